// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::apex_renderer::ApexRenderer;
use crate::presentation::chart_registry::ChartRegistry;
use tokio::sync::Mutex;

pub struct AppState {
    pub dashboard_service: DashboardService,
    pub charts: Mutex<ChartRegistry<ApexRenderer>>,
}

impl AppState {
    pub fn new(dashboard_service: DashboardService) -> Self {
        Self {
            dashboard_service,
            charts: Mutex::new(ChartRegistry::new(ApexRenderer::new())),
        }
    }
}
