// Application-level errors surfaced to the presentation layer
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The aggregation backend failed or returned something undecodable.
    #[error("backend request failed: {message}")]
    Upstream { message: String },

    #[error("could not render chart {slot}: {message}")]
    Render { slot: &'static str, message: String },
}

impl DashboardError {
    pub fn upstream(error: anyhow::Error) -> Self {
        DashboardError::Upstream {
            message: format!("{:#}", error),
        }
    }
}
