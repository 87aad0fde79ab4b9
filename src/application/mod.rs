// Application layer - Use cases and the pure derivation pipeline
pub mod admissions_repository;
pub mod chart_builder;
pub mod chart_renderer;
pub mod dashboard_service;
pub mod error;
pub mod filter_state;
pub mod request_sequencer;
pub mod table_projector;
pub mod threshold_classifier;
pub mod view_model;
