// HTTP request handlers
use crate::application::dashboard_service::{AppliedView, ApplyOutcome};
use crate::application::error::DashboardError;
use crate::domain::filters::{FilterOptions, RawControlValues};
use crate::domain::view_state::ViewState;
use crate::infrastructure::apex_renderer::{ApexRenderer, RenderCommand};
use crate::infrastructure::http_response::{error_response, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::chart_registry::ChartRegistry;
use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardResponse<'a> {
    Applied {
        sequence: u64,
        view: &'a ViewState,
        renders: Vec<RenderCommand>,
    },
    Superseded {
        sequence: u64,
        latest: u64,
    },
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Filter options loaded at startup
pub async fn filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.dashboard_service.filter_options().await)
}

/// Current view for a freshly loaded page. Every chart is created anew.
pub async fn current_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let Some(applied) = state.dashboard_service.current().await else {
        return error_response(StatusCode::NOT_FOUND, "No dashboard has been loaded yet");
    };

    let mut charts = state.charts.lock().await;
    charts.clear();
    render_applied(&mut charts, &applied)
}

/// Apply a filter selection and return the new view with render commands.
pub async fn apply_filters(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawControlValues>,
) -> Response {
    match state.dashboard_service.apply(&raw).await {
        Ok(ApplyOutcome::Applied(applied)) => render_if_current(&state, &applied).await,
        Ok(ApplyOutcome::Superseded { sequence, latest }) => json_response(
            StatusCode::OK,
            DashboardResponse::Superseded { sequence, latest },
        ),
        Err(e @ DashboardError::Upstream { .. }) => error_response(StatusCode::BAD_GATEWAY, e),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// Render `applied` unless a newer view was committed while this request
/// waited for the chart registry.
async fn render_if_current(state: &AppState, applied: &AppliedView) -> Response {
    let mut charts = state.charts.lock().await;
    let latest = state
        .dashboard_service
        .current()
        .await
        .map_or(applied.sequence, |current| current.sequence);
    if latest > applied.sequence {
        tracing::debug!(sequence = applied.sequence, latest, "Skipping render of stale view");
        return json_response(
            StatusCode::OK,
            DashboardResponse::Superseded {
                sequence: applied.sequence,
                latest,
            },
        );
    }
    render_applied(&mut charts, applied)
}

fn render_applied(charts: &mut ChartRegistry<ApexRenderer>, applied: &AppliedView) -> Response {
    if let Err(e) = charts.render_all(&applied.view.charts) {
        charts.renderer_mut().drain();
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e);
    }
    let renders = charts.renderer_mut().drain();

    json_response(
        StatusCode::OK,
        DashboardResponse::Applied {
            sequence: applied.sequence,
            view: &applied.view,
            renders,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::testing::FakeRepository;
    use crate::application::dashboard_service::DashboardService;
    use crate::domain::filters::{FilterSelection, TargetDefaults};
    use serde_json::Value;

    fn state() -> AppState {
        let service = DashboardService::new(
            Arc::new(FakeRepository::default()),
            TargetDefaults {
                overall: "0".to_string(),
                manual: String::new(),
                yoy: "0".to_string(),
            },
        );
        AppState::new(service)
    }

    async fn apply(state: &AppState, year: &str) -> Arc<AppliedView> {
        let filters = FilterSelection {
            year: year.to_string(),
            ..FilterSelection::default()
        };
        match state.dashboard_service.apply_selection(filters).await.unwrap() {
            ApplyOutcome::Applied(applied) => applied,
            other => panic!("expected applied, got {:?}", other),
        }
    }

    async fn body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_stale_view_is_not_rendered_after_newer_one() {
        let state = state();
        let older = apply(&state, "2025").await;
        let newer = apply(&state, "2026").await;

        // the newer request reaches the registry first
        let rendered = body(render_if_current(&state, &newer).await).await;
        assert_eq!(rendered["status"], "applied");
        assert_eq!(rendered["renders"][0]["action"], "create");

        let stale = body(render_if_current(&state, &older).await).await;
        assert_eq!(stale["status"], "superseded");
        assert_eq!(stale["sequence"], 1);
        assert_eq!(stale["latest"], 2);

        // the stale view left no trace in the registry
        let again = body(render_if_current(&state, &newer).await).await;
        assert_eq!(again["renders"][0]["action"], "update");
        assert_eq!(again["renders"][0]["revision"], 1);
        assert_eq!(again["view"]["filters"]["year"], "2026");
    }
}
