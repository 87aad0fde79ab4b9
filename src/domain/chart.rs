// Declarative chart specifications, independent of any charting library
use super::reported::format_number;
use serde::Serialize;

pub const CHART_COUNT: usize = 10;

/// Identity of a chart placement on the page. The render boundary keys its
/// live chart instances on this, never on spec content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartSlot {
    #[serde(rename = "admissionsTrendChart")]
    AdmissionsTrend,
    #[serde(rename = "admissionsByRlcRegionChart")]
    AdmissionsByRegion,
    #[serde(rename = "genderDistributionChart")]
    GenderDistribution,
    #[serde(rename = "admissionsByQualificationChart")]
    AdmissionsByQualification,
    #[serde(rename = "lowCompletionCentersChart")]
    LowCompletionCenters,
    #[serde(rename = "examEventPredictionChart")]
    ExamEventPrediction,
    #[serde(rename = "admissionsHeatmap")]
    AdmissionsHeatmap,
    #[serde(rename = "alcLlcBubbleChart")]
    CenterPerformance,
    #[serde(rename = "admissionsByAgeGroupChart")]
    AdmissionsByAgeGroup,
    #[serde(rename = "admissionsTrendPerRegionGenderChart")]
    RegionGenderStack,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; CHART_COUNT] = [
        ChartSlot::AdmissionsTrend,
        ChartSlot::AdmissionsByRegion,
        ChartSlot::GenderDistribution,
        ChartSlot::AdmissionsByQualification,
        ChartSlot::LowCompletionCenters,
        ChartSlot::ExamEventPrediction,
        ChartSlot::AdmissionsHeatmap,
        ChartSlot::CenterPerformance,
        ChartSlot::AdmissionsByAgeGroup,
        ChartSlot::RegionGenderStack,
    ];

    /// Element id of the chart container on the page.
    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::AdmissionsTrend => "admissionsTrendChart",
            ChartSlot::AdmissionsByRegion => "admissionsByRlcRegionChart",
            ChartSlot::GenderDistribution => "genderDistributionChart",
            ChartSlot::AdmissionsByQualification => "admissionsByQualificationChart",
            ChartSlot::LowCompletionCenters => "lowCompletionCentersChart",
            ChartSlot::ExamEventPrediction => "examEventPredictionChart",
            ChartSlot::AdmissionsHeatmap => "admissionsHeatmap",
            ChartSlot::CenterPerformance => "alcLlcBubbleChart",
            ChartSlot::AdmissionsByAgeGroup => "admissionsByAgeGroupChart",
            ChartSlot::RegionGenderStack => "admissionsTrendPerRegionGenderChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    HorizontalBar,
    StackedBar,
    Donut,
    Heatmap,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataPoint {
    Value { y: f64 },
    Labeled { x: String, y: f64 },
    /// Two plotted dimensions plus a carried value that is not plotted.
    Triple { x: f64, y: f64, z: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: Option<String>,
    pub data: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: Option<String>, data: Vec<DataPoint>) -> Self {
        Self { name, data }
    }
}

/// How numeric values are turned into label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Percent,
    Integer,
    IntegerPercent,
}

impl ValueFormat {
    pub fn apply(self, value: f64) -> String {
        match self {
            ValueFormat::Percent => format!("{}%", format_number(value)),
            // halves round away from zero
            ValueFormat::Integer => format!("{:.0}", value.round()),
            ValueFormat::IntegerPercent => format!("{:.0}%", value.round()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Category,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub kind: AxisKind,
    pub title: Option<String>,
    /// Full category values, used for matching data to the axis.
    pub categories: Vec<String>,
    /// What is actually printed for each category.
    pub display_labels: Vec<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub tick_amount: Option<u32>,
    pub label_format: Option<ValueFormat>,
}

impl Axis {
    pub fn category(categories: Vec<String>) -> Self {
        Self {
            kind: AxisKind::Category,
            title: None,
            display_labels: categories.clone(),
            categories,
            min: None,
            max: None,
            tick_amount: None,
            label_format: None,
        }
    }

    pub fn numeric() -> Self {
        Self {
            kind: AxisKind::Numeric,
            title: None,
            categories: Vec::new(),
            display_labels: Vec::new(),
            min: None,
            max: None,
            tick_amount: None,
            label_format: None,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn bounded(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Cap printed labels at `budget` characters. Categories are untouched.
    pub fn truncated(mut self, budget: usize) -> Self {
        self.display_labels = self
            .categories
            .iter()
            .map(|c| truncate_label(c, budget))
            .collect();
        self
    }
}

/// Cut `label` to `budget` characters followed by an ellipsis when longer.
pub fn truncate_label(label: &str, budget: usize) -> String {
    if label.chars().count() > budget {
        let head: String = label.chars().take(budget).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// A static horizontal line drawn at a value on the y axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub y: f64,
    pub color: &'static str,
    pub label: String,
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub show: bool,
    pub position: Option<LegendPosition>,
    pub align_left: bool,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            show: true,
            position: None,
            align_left: false,
        }
    }
}

/// A legend override applied when the viewport is narrower than `max_width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub max_width: u32,
    pub legend_position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "px", rename_all = "snake_case")]
pub enum ChartHeight {
    Fill,
    Fixed(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tooltip {
    Default,
    ValueSuffix { suffix: &'static str },
    /// Cell text built from the row (geography), column (demography) and value.
    HeatmapCell,
    /// Point text built from the carried triple, never recomputed.
    CenterDetails,
}

/// Static presentation choices that do not depend on the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualOptions {
    pub height: ChartHeight,
    pub toolbar: bool,
    pub zoom: bool,
    pub smooth: bool,
    pub column_width: Option<&'static str>,
    pub data_labels: Option<ValueFormat>,
    pub legend: Legend,
    pub responsive: Vec<Breakpoint>,
    pub colors: Vec<&'static str>,
    pub tooltip: Tooltip,
    pub show_stack_totals: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            height: ChartHeight::Fill,
            toolbar: false,
            zoom: false,
            smooth: false,
            column_width: None,
            data_labels: None,
            legend: Legend::default(),
            responsive: Vec::new(),
            colors: Vec::new(),
            tooltip: Tooltip::Default,
            show_stack_totals: false,
        }
    }
}

/// Everything a render adapter needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub kind: ChartKind,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub annotations: Vec<Annotation>,
    /// Per-category sums across stacked series.
    pub stack_totals: Vec<f64>,
    /// Alert text shown next to the chart, verbatim from the backend.
    pub alert: Option<String>,
    pub options: VisualOptions,
}

impl ChartSpec {
    pub fn new(slot: ChartSlot, kind: ChartKind) -> Self {
        Self {
            slot,
            kind,
            title: None,
            subtitle: None,
            series: Vec::new(),
            x_axis: Axis::category(Vec::new()),
            y_axis: Axis::numeric(),
            annotations: Vec::new(),
            stack_totals: Vec::new(),
            alert: None,
            options: VisualOptions::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.data.is_empty())
    }

    /// Data label text for every point, in series order.
    pub fn data_label_text(&self) -> Vec<Vec<String>> {
        let Some(format) = self.options.data_labels else {
            return Vec::new();
        };
        self.series
            .iter()
            .map(|s| {
                s.data
                    .iter()
                    .map(|p| match p {
                        DataPoint::Value { y } | DataPoint::Labeled { y, .. } => format.apply(*y),
                        DataPoint::Triple { y, .. } => format.apply(*y),
                    })
                    .collect()
            })
            .collect()
    }

    /// Tooltip text for one point, assembled from the series data and axis categories.
    pub fn tooltip_text(&self, series_index: usize, point_index: usize) -> Option<String> {
        let series = self.series.get(series_index)?;
        let point = series.data.get(point_index)?;
        let name = series.name.as_deref().unwrap_or_default();

        match (&self.options.tooltip, point) {
            (Tooltip::CenterDetails, DataPoint::Triple { x, y, z }) => Some(format!(
                "{}\nCompletion Rate: {}%\nAverage Age: {}\nTotal Admissions: {}",
                name,
                format_number(*y),
                format_number(*x),
                format_number(*z)
            )),
            (Tooltip::HeatmapCell, DataPoint::Labeled { x, y }) => Some(format!(
                "Region: {}, Qualification: {}, Admissions: {}",
                name,
                x,
                format_number(*y)
            )),
            (Tooltip::ValueSuffix { suffix }, p) => Some(format!("{}{}", format_number(point_y(p)), suffix)),
            (_, p) => Some(format_number(point_y(p))),
        }
    }
}

fn point_y(point: &DataPoint) -> f64 {
    match point {
        DataPoint::Value { y } | DataPoint::Labeled { y, .. } | DataPoint::Triple { y, .. } => *y,
    }
}
