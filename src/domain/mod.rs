// Domain layer - Plain data types shared by every other layer
pub mod chart;
pub mod filters;
pub mod kpi;
pub mod payload;
pub mod reported;
pub mod table;
pub mod view_state;
