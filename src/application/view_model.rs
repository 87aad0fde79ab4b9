// Dashboard view model - composes classification, charts and table into one snapshot
use crate::application::chart_builder::build_all;
use crate::application::table_projector::project_table;
use crate::application::threshold_classifier::classify_kpis;
use crate::domain::filters::FilterSelection;
use crate::domain::payload::AggregatePayload;
use crate::domain::view_state::{RecommendationList, ViewState};

/// Derive the complete view state for one payload. Pure and total for any
/// payload that decoded successfully.
pub fn derive(payload: &AggregatePayload, filters: &FilterSelection) -> ViewState {
    ViewState {
        filters: filters.clone(),
        kpis: classify_kpis(&payload.kpis),
        charts: build_all(&payload.chart_data),
        table: project_table(&payload.table_data),
        recommendations: RecommendationList::from_backend(&payload.recommendations),
    }
}
