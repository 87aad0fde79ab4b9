// Threshold classification for the headline KPIs
use crate::domain::kpi::{GrowthIndicator, GrowthStatus, KpiStatus, PredictionIndicator, PredictionStatus};
use crate::domain::payload::KpiBlock;
use crate::domain::reported::{format_grouped, format_number, Reported, NOT_AVAILABLE};

/// Share of the overall target a prediction must reach to count as on track.
pub const ON_TRACK_RATIO: f64 = 0.9;

/// Backend warning wins; otherwise the prediction must be available and
/// reach 90% of the target. Only multiplies the target, so a zero target is safe.
pub fn classify_prediction(kpis: &KpiBlock) -> PredictionStatus {
    if kpis.on_track_warning {
        return PredictionStatus::BelowTarget;
    }
    match kpis.predicted_admissions {
        Reported::Value(predicted) if predicted >= kpis.overall_target * ON_TRACK_RATIO => {
            PredictionStatus::OnTrack
        }
        _ => PredictionStatus::DefaultAtRisk,
    }
}

pub fn classify_growth(yoy_growth: Reported, yoy_target: f64) -> GrowthStatus {
    match yoy_growth {
        Reported::NotAvailable => GrowthStatus::GrowthUnknown,
        Reported::Value(growth) if growth >= yoy_target => GrowthStatus::GrowthMet,
        Reported::Value(_) => GrowthStatus::GrowthBelow,
    }
}

/// Classify both indicators and format the headline figures for display.
pub fn classify_kpis(kpis: &KpiBlock) -> KpiStatus {
    let prediction = classify_prediction(kpis);
    let growth = classify_growth(kpis.yoy_growth, kpis.yoy_target);

    KpiStatus {
        total_admissions: format_grouped(kpis.total_admissions as f64),
        completion_rate: kpis.completion_rate.clone(),
        predicted_admissions: match kpis.predicted_admissions {
            Reported::Value(v) => format_grouped(v),
            Reported::NotAvailable => NOT_AVAILABLE.to_string(),
        },
        prediction: PredictionIndicator {
            status: prediction,
            color: prediction.color(),
            gradient: prediction.color().gradient(),
            message: prediction.message(&format_grouped(kpis.overall_target)),
        },
        yoy_growth: match kpis.yoy_growth {
            Reported::Value(v) => format!("{}%", format_number(v)),
            Reported::NotAvailable => NOT_AVAILABLE.to_string(),
        },
        yoy_target: format!("{}%", format_number(kpis.yoy_target)),
        growth: GrowthIndicator {
            status: growth,
            color: growth.color(),
            gradient: growth.color().gradient(),
            icon: growth.icon(),
        },
    }
}
