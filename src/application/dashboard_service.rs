// Dashboard service - Use case for applying filters and keeping the latest view
use crate::application::admissions_repository::AdmissionsRepository;
use crate::application::error::DashboardError;
use crate::application::filter_state::build_filter_selection;
use crate::application::request_sequencer::RequestSequencer;
use crate::application::view_model::derive;
use crate::domain::filters::{FilterOptions, FilterSelection, RawControlValues, TargetDefaults};
use crate::domain::view_state::ViewState;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A derived view together with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedView {
    pub sequence: u64,
    pub view: ViewState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied(Arc<AppliedView>),
    /// A newer request was issued while this one was in flight; its
    /// response was dropped.
    Superseded { sequence: u64, latest: u64 },
}

pub struct DashboardService {
    repository: Arc<dyn AdmissionsRepository>,
    target_defaults: TargetDefaults,
    filter_options: RwLock<FilterOptions>,
    sequencer: RequestSequencer,
    current: RwLock<Option<Arc<AppliedView>>>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn AdmissionsRepository>, target_defaults: TargetDefaults) -> Self {
        Self {
            repository,
            target_defaults,
            filter_options: RwLock::new(FilterOptions::default()),
            sequencer: RequestSequencer::new(),
            current: RwLock::new(None),
        }
    }

    /// Fetch the filter options and keep them for building selections.
    /// On failure the previous options (empty at startup) stay in place.
    pub async fn load_filter_options(&self) -> Result<FilterOptions, DashboardError> {
        let options = self
            .repository
            .fetch_filter_options()
            .await
            .map_err(DashboardError::upstream)?;

        tracing::info!(
            years = options.years.len(),
            exam_events = options.exam_events.len(),
            regions = options.rlc_regions.len(),
            "Loaded filter options"
        );
        *self.filter_options.write().await = options.clone();
        Ok(options)
    }

    pub async fn filter_options(&self) -> FilterOptions {
        self.filter_options.read().await.clone()
    }

    /// The last successfully applied view, if any.
    pub async fn current(&self) -> Option<Arc<AppliedView>> {
        self.current.read().await.clone()
    }

    /// Build a selection from raw page controls and apply it.
    pub async fn apply(&self, raw: &RawControlValues) -> Result<ApplyOutcome, DashboardError> {
        let options = self.filter_options().await;
        let today = chrono::Local::now().date_naive();
        let filters = build_filter_selection(raw, &options, &self.target_defaults, today);
        self.apply_selection(filters).await
    }

    /// Fetch aggregates for `filters` and replace the current view, unless a
    /// newer request has been issued in the meantime. A failed request leaves
    /// the current view untouched.
    pub async fn apply_selection(&self, filters: FilterSelection) -> Result<ApplyOutcome, DashboardError> {
        let sequence = self.sequencer.issue();
        tracing::info!(sequence, year = %filters.year, region = %filters.rlc_region, "Applying filters");

        let payload = match self.repository.fetch_aggregates(&filters).await {
            Ok(payload) => payload,
            Err(e) if !self.sequencer.is_latest(sequence) => {
                tracing::debug!(sequence, "Dropping failure of superseded request: {:#}", e);
                return Ok(self.superseded(sequence));
            }
            Err(e) => {
                tracing::error!(sequence, "Error fetching aggregates: {:#}", e);
                return Err(DashboardError::upstream(e));
            }
        };

        let view = derive(&payload, &filters);
        tracing::debug!(
            sequence,
            underperforming = view.table.rows().len(),
            table_empty = view.table.is_empty(),
            "Derived view state"
        );

        let mut current = self.current.write().await;
        let newer_committed = current.as_ref().is_some_and(|c| c.sequence > sequence);
        if !self.sequencer.is_latest(sequence) || newer_committed {
            tracing::debug!(sequence, latest = self.sequencer.latest(), "Discarding stale response");
            return Ok(self.superseded(sequence));
        }

        let applied = Arc::new(AppliedView { sequence, view });
        *current = Some(applied.clone());
        Ok(ApplyOutcome::Applied(applied))
    }

    fn superseded(&self, sequence: u64) -> ApplyOutcome {
        ApplyOutcome::Superseded {
            sequence,
            latest: self.sequencer.latest(),
        }
    }
}
