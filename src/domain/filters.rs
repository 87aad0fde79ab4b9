// Filter selection domain model
use serde::{Deserialize, Serialize};

/// Sentinel meaning "no filter applied" for a categorical field.
pub const ALL: &str = "All";

/// The validated set of selection criteria sent with an aggregate request.
///
/// Targets and the end date are kept as the raw text the user entered;
/// malformed values are passed through and dealt with by classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub year: String,
    pub exam_event: String,
    pub rlc_region: String,
    pub learner_district: String,
    pub gender: String,
    pub qualification: String,
    pub overall_target: String,
    pub manual_target: String,
    pub yoy_target: String,
    pub exam_event_end_date: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            year: ALL.to_string(),
            exam_event: ALL.to_string(),
            rlc_region: ALL.to_string(),
            learner_district: ALL.to_string(),
            gender: ALL.to_string(),
            qualification: ALL.to_string(),
            overall_target: String::new(),
            manual_target: String::new(),
            yoy_target: String::new(),
            exam_event_end_date: String::new(),
        }
    }
}

/// Control values as submitted by the page. Any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawControlValues {
    pub year: Option<String>,
    pub exam_event: Option<String>,
    pub rlc_region: Option<String>,
    pub learner_district: Option<String>,
    pub gender: Option<String>,
    pub qualification: Option<String>,
    pub overall_target: Option<String>,
    pub manual_target: Option<String>,
    pub yoy_target: Option<String>,
    pub exam_event_end_date: Option<String>,
}

/// Distinct values available for each filter, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub years: Vec<String>,
    pub exam_events: Vec<String>,
    pub rlc_regions: Vec<String>,
    pub learner_districts: Vec<String>,
    pub genders: Vec<String>,
    pub qualifications: Vec<String>,
}

/// Fallback target values used when the page leaves a target control empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetDefaults {
    pub overall: String,
    pub manual: String,
    pub yoy: String,
}
