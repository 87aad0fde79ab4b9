// Repository trait for the admissions aggregation backend
use crate::domain::filters::{FilterOptions, FilterSelection};
use crate::domain::payload::AggregatePayload;
use async_trait::async_trait;

#[async_trait]
pub trait AdmissionsRepository: Send + Sync {
    /// Distinct values for every filter control. Called once at startup.
    async fn fetch_filter_options(&self) -> anyhow::Result<FilterOptions>;

    /// Pre-aggregated dashboard data for one filter selection
    async fn fetch_aggregates(&self, filters: &FilterSelection) -> anyhow::Result<AggregatePayload>;
}
