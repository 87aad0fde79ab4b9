// Port to the chart library that draws specs on the page
use crate::application::error::DashboardError;
use crate::domain::chart::ChartSpec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderAction {
    Create,
    Update,
}

/// Draws charts from specs. `create` is called once per slot, `update` for
/// every later spec destined for the same slot.
pub trait ChartRenderer {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Result<Self::Handle, DashboardError>;

    fn update(&mut self, handle: &mut Self::Handle, spec: &ChartSpec) -> Result<(), DashboardError>;
}
