// Underperformance table domain models
use super::payload::TableRow;
use serde::Serialize;

pub const NO_UNDERPERFORMERS_MESSAGE: &str =
    "No underperforming centers found for the selected filters.";

/// A surviving center row with its parsed completion and emphasis flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRow {
    #[serde(flatten)]
    pub row: TableRow,
    pub completion: f64,
    pub critical: bool,
}

/// Either ranked rows or an explicit "nothing to show" state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TableProjection {
    Rows { rows: Vec<RankedRow> },
    Empty { message: &'static str },
}

impl TableProjection {
    pub fn empty() -> Self {
        TableProjection::Empty {
            message: NO_UNDERPERFORMERS_MESSAGE,
        }
    }

    pub fn rows(&self) -> &[RankedRow] {
        match self {
            TableProjection::Rows { rows } => rows,
            TableProjection::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableProjection::Empty { .. })
    }
}
