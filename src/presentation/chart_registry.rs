// Chart slot registry - remembers which charts are live on the page
use crate::application::chart_renderer::{ChartRenderer, RenderAction};
use crate::application::error::DashboardError;
use crate::domain::chart::{ChartSlot, ChartSpec};
use std::collections::HashMap;

/// Maps slot identity to the renderer's live instance. The first spec for a
/// slot creates the chart; every later one updates it, whatever its content.
pub struct ChartRegistry<R: ChartRenderer> {
    renderer: R,
    instances: HashMap<ChartSlot, R::Handle>,
}

impl<R: ChartRenderer> ChartRegistry<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            instances: HashMap::new(),
        }
    }

    pub fn render_or_update(&mut self, spec: &ChartSpec) -> Result<RenderAction, DashboardError> {
        match self.instances.get_mut(&spec.slot) {
            Some(handle) => {
                self.renderer.update(handle, spec)?;
                tracing::debug!(slot = spec.slot.id(), "Updated chart");
                Ok(RenderAction::Update)
            }
            None => {
                let handle = self.renderer.create(spec)?;
                self.instances.insert(spec.slot, handle);
                tracing::debug!(slot = spec.slot.id(), "Created chart");
                Ok(RenderAction::Create)
            }
        }
    }

    /// Render every spec in order. If one fails, slots created by this call
    /// are forgotten again so the next render creates them.
    pub fn render_all(&mut self, specs: &[ChartSpec]) -> Result<Vec<RenderAction>, DashboardError> {
        let mut actions = Vec::with_capacity(specs.len());
        for spec in specs {
            match self.render_or_update(spec) {
                Ok(action) => actions.push(action),
                Err(e) => {
                    for (created, _) in specs.iter().zip(&actions).filter(|(_, a)| **a == RenderAction::Create) {
                        self.instances.remove(&created.slot);
                    }
                    tracing::warn!(slot = spec.slot.id(), "Chart render failed: {}", e);
                    return Err(e);
                }
            }
        }
        Ok(actions)
    }

    /// Forget every live chart, e.g. when the page is loaded afresh.
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
