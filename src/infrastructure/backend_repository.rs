// HTTP client for the admissions aggregation backend
use crate::application::admissions_repository::AdmissionsRepository;
use crate::domain::filters::{FilterOptions, FilterSelection};
use crate::domain::payload::AggregatePayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BackendRepository {
    base_url: String,
    client: reqwest::Client,
}

/// Aggregate request body. The page sends the exam event twice; the
/// backend reads `selectedExamEvent` for the prediction chart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateRequest<'a> {
    #[serde(flatten)]
    filters: &'a FilterSelection,
    selected_exam_event: &'a str,
}

impl<'a> AggregateRequest<'a> {
    fn new(filters: &'a FilterSelection) -> Self {
        Self {
            filters,
            selected_exam_event: &filters.exam_event,
        }
    }
}

impl BackendRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend {} request failed with status {}: {}", what, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse backend {} response", what))
    }
}

#[async_trait]
impl AdmissionsRepository for BackendRepository {
    async fn fetch_filter_options(&self) -> Result<FilterOptions> {
        let response = self
            .client
            .get(self.url("filters"))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send filter options request")?;

        Self::decode(response, "filter options").await
    }

    async fn fetch_aggregates(&self, filters: &FilterSelection) -> Result<AggregatePayload> {
        tracing::debug!(?filters, "Requesting aggregates");
        let response = self
            .client
            .post(self.url("dashboard"))
            .header("Accept", "application/json")
            .json(&AggregateRequest::new(filters))
            .send()
            .await
            .context("Failed to send aggregate request")?;

        Self::decode(response, "aggregate").await
    }
}
