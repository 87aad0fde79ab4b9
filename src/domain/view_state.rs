// Derived dashboard snapshot
use super::chart::{ChartSpec, CHART_COUNT};
use super::filters::FilterSelection;
use super::kpi::KpiStatus;
use super::table::TableProjection;
use serde::Serialize;

pub const HEALTHY_DASHBOARD_MESSAGE: &str =
    "No specific recommendations at this time. Dashboard looks healthy!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecommendationList {
    Items { items: Vec<String> },
    Placeholder { message: &'static str },
}

impl RecommendationList {
    pub fn from_backend(recommendations: &[String]) -> Self {
        if recommendations.is_empty() {
            RecommendationList::Placeholder {
                message: HEALTHY_DASHBOARD_MESSAGE,
            }
        } else {
            RecommendationList::Items {
                items: recommendations.to_vec(),
            }
        }
    }
}

/// Immutable view of one filter-apply cycle. A new instance replaces the
/// previous one wholesale; nothing patches it in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filters: FilterSelection,
    pub kpis: KpiStatus,
    pub charts: [ChartSpec; CHART_COUNT],
    pub table: TableProjection,
    pub recommendations: RecommendationList,
}
