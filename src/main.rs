// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{ApplyOutcome, DashboardService};
use crate::domain::filters::RawControlValues;
use crate::infrastructure::backend_repository::BackendRepository;
use crate::infrastructure::config::load_dashboard_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{apply_filters, current_dashboard, filter_options, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(BackendRepository::new(
        config.backend.base_url.clone(),
        config.backend.timeout(),
    )?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository, config.targets.clone().into());

    // Filter options first, then the initial view with default filters.
    // A backend outage here leaves the server up with "All" defaults.
    if let Err(e) = dashboard_service.load_filter_options().await {
        tracing::error!("Error loading filter options: {}", e);
    }
    match dashboard_service.apply(&RawControlValues::default()).await {
        Ok(ApplyOutcome::Applied(applied)) => {
            tracing::info!(sequence = applied.sequence, "Initial dashboard loaded")
        }
        Ok(ApplyOutcome::Superseded { .. }) => {}
        Err(e) => tracing::error!("Error loading initial dashboard: {}", e),
    }

    // Create application state
    let state = Arc::new(AppState::new(dashboard_service));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/filters", get(filter_options))
        .route("/dashboard", get(current_dashboard))
        .route("/dashboard/apply", post(apply_filters))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting admissions-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
