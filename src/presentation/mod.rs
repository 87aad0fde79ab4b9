// Presentation layer - HTTP surface and render bookkeeping
pub mod app_state;
pub mod chart_registry;
pub mod handlers;
