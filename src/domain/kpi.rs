// KPI status domain models
use serde::Serialize;

/// Fixed colour tokens the page maps onto card backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Danger,
    Success,
    Primary,
}

impl ColorToken {
    /// Start and end colours of the card gradient.
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            ColorToken::Danger => ("#dc3545", "#b02a37"),
            ColorToken::Success => ("#28a745", "#218838"),
            ColorToken::Primary => ("#007bff", "#0056b3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    BelowTarget,
    OnTrack,
    DefaultAtRisk,
}

impl PredictionStatus {
    pub fn color(self) -> ColorToken {
        match self {
            PredictionStatus::OnTrack => ColorToken::Success,
            PredictionStatus::BelowTarget | PredictionStatus::DefaultAtRisk => ColorToken::Danger,
        }
    }

    /// Message shown under the predicted admissions figure. Empty for the
    /// at-risk state.
    pub fn message(self, formatted_target: &str) -> String {
        match self {
            PredictionStatus::BelowTarget => {
                format!("Predicted to be below target of {}.", formatted_target)
            }
            PredictionStatus::OnTrack => format!("On track for target of {}.", formatted_target),
            PredictionStatus::DefaultAtRisk => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthStatus {
    GrowthMet,
    GrowthBelow,
    GrowthUnknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendIcon {
    Up,
    Down,
    None,
}

impl GrowthStatus {
    pub fn color(self) -> ColorToken {
        match self {
            GrowthStatus::GrowthMet => ColorToken::Success,
            GrowthStatus::GrowthBelow => ColorToken::Danger,
            GrowthStatus::GrowthUnknown => ColorToken::Primary,
        }
    }

    pub fn icon(self) -> TrendIcon {
        match self {
            GrowthStatus::GrowthMet => TrendIcon::Up,
            GrowthStatus::GrowthBelow => TrendIcon::Down,
            GrowthStatus::GrowthUnknown => TrendIcon::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionIndicator {
    pub status: PredictionStatus,
    pub color: ColorToken,
    pub gradient: (&'static str, &'static str),
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthIndicator {
    pub status: GrowthStatus,
    pub color: ColorToken,
    pub gradient: (&'static str, &'static str),
    pub icon: TrendIcon,
}

/// Headline figures with their derived qualitative status, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiStatus {
    pub total_admissions: String,
    pub completion_rate: String,
    pub predicted_admissions: String,
    pub prediction: PredictionIndicator,
    pub yoy_growth: String,
    pub yoy_target: String,
    pub growth: GrowthIndicator,
}
