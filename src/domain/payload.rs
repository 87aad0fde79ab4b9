// Aggregate payload domain models, as returned by the aggregation backend
use super::reported::{lenient_number, Reported};
use serde::{Deserialize, Serialize};

/// Pre-grouped admissions data for one filter selection.
///
/// Every block is required. A payload missing one of them is rejected at
/// decode time rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatePayload {
    pub kpis: KpiBlock,
    pub chart_data: ChartData,
    pub table_data: Vec<TableRow>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBlock {
    pub total_admissions: u64,
    pub completion_rate: String,
    pub predicted_admissions: Reported,
    pub on_track_warning: bool,
    #[serde(deserialize_with = "lenient_number")]
    pub overall_target: f64,
    pub yoy_growth: Reported,
    #[serde(deserialize_with = "lenient_number")]
    pub yoy_target: f64,
}

/// A `{x, y}` point whose category label travels with the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub x: String,
    #[serde(deserialize_with = "lenient_number")]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// Values laid out against a shared category axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub series: Vec<NamedSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEventPrediction {
    pub series: Vec<NamedSeries>,
    #[serde(deserialize_with = "lenient_number")]
    pub displayed_target: f64,
    /// Empty when the prediction meets the event target.
    pub target_alert: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub name: String,
    pub data: Vec<CategoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub series: Vec<HeatmapRow>,
    pub demo_categories: Vec<String>,
    pub geo_categories: Vec<String>,
}

/// One center in the performance scatter: `[average age, completion %, admissions]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub name: String,
    pub data: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub admissions_trend: CategorySeries,
    pub admissions_by_rlc_region: Vec<CategoryPoint>,
    pub gender_distribution: Vec<CategoryPoint>,
    pub admissions_by_qualification: Vec<CategoryPoint>,
    pub low_completion_centers: Vec<CategoryPoint>,
    pub exam_event_prediction: ExamEventPrediction,
    pub admissions_heatmap: Heatmap,
    pub alc_llc_bubble_chart: Vec<ScatterSeries>,
    pub admissions_by_age_group: Vec<CategoryPoint>,
    pub admissions_trend_per_region_gender: CategorySeries,
}

/// One admissions center in the performance table. `center_name` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub center_name: String,
    pub actual_admissions: u64,
    pub completion_pct: String,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_internal_marks: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_internal_score: f64,
    pub gender_mix: String,
    pub payment_status_mix: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_kpis_with_sentinels() {
        let json = r#"{
            "totalAdmissions": 1000,
            "completionRate": "85%",
            "predictedAdmissions": "N/A",
            "onTrackWarning": false,
            "overallTarget": "1000",
            "yoyGrowth": "N/A",
            "yoyTarget": "10"
        }"#;
        let kpis: KpiBlock = serde_json::from_str(json).unwrap();
        assert_eq!(kpis.predicted_admissions, Reported::NotAvailable);
        assert_eq!(kpis.yoy_growth, Reported::NotAvailable);
        assert_eq!(kpis.overall_target, 1000.0);
        assert_eq!(kpis.yoy_target, 10.0);
    }

    #[test]
    fn test_decode_malformed_target_becomes_nan() {
        let json = r#"{
            "totalAdmissions": 5,
            "completionRate": "0%",
            "predictedAdmissions": 5,
            "onTrackWarning": false,
            "overallTarget": "lots",
            "yoyGrowth": 1,
            "yoyTarget": ""
        }"#;
        let kpis: KpiBlock = serde_json::from_str(json).unwrap();
        assert!(kpis.overall_target.is_nan());
        assert!(kpis.yoy_target.is_nan());
    }

    #[test]
    fn test_decode_rejects_missing_chart_block() {
        let mut value = serde_json::to_value(fixtures::payload()).unwrap();
        value["chartData"]
            .as_object_mut()
            .unwrap()
            .remove("admissionsHeatmap");
        let result: Result<AggregatePayload, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_missing_series_fields() {
        let without_alert = r#"{"series": [], "displayedTarget": 900}"#;
        assert!(serde_json::from_str::<ExamEventPrediction>(without_alert).is_err());

        let without_name = r#"{"categories": ["Jan"], "series": [{"data": [1]}]}"#;
        assert!(serde_json::from_str::<CategorySeries>(without_name).is_err());

        let complete = r#"{"series": [{"name": "Actual", "data": [600]}], "displayedTarget": "900", "targetAlert": ""}"#;
        let prediction: ExamEventPrediction = serde_json::from_str(complete).unwrap();
        assert_eq!(prediction.displayed_target, 900.0);
        assert_eq!(prediction.series[0].name, "Actual");
    }

    #[test]
    fn test_decode_table_row_with_string_numbers() {
        let json = r#"{
            "centerName": "A",
            "actualAdmissions": 12,
            "completionPct": "65.5",
            "avgInternalMarks": "71.2",
            "avgInternalScore": 3,
            "genderMix": "M: 6, F: 6",
            "paymentStatusMix": "Paid: 12"
        }"#;
        let row: TableRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.avg_internal_marks, 71.2);
        assert_eq!(row.avg_internal_score, 3.0);
        assert_eq!(row.completion_pct, "65.5");
    }
}
