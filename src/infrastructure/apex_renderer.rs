// ApexCharts adapter - converts chart specs into ApexCharts option objects
use crate::application::chart_renderer::{ChartRenderer, RenderAction};
use crate::application::error::DashboardError;
use crate::domain::chart::{
    Axis, AxisKind, ChartHeight, ChartKind, ChartSlot, ChartSpec, DataPoint, LegendPosition, Series,
    Tooltip,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

const NO_DATA_TEXT: &str = "No data for the selected filters";

/// Live chart on the page, as far as the server knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApexHandle {
    pub slot: ChartSlot,
    pub revision: u32,
}

/// Instruction for the page: build or refresh the chart in `slot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderCommand {
    pub slot: ChartSlot,
    pub action: RenderAction,
    pub revision: u32,
    pub options: Value,
}

#[derive(Debug, Default)]
pub struct ApexRenderer {
    pending: Vec<RenderCommand>,
}

impl ApexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the commands produced since the last drain.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.pending)
    }
}

impl ChartRenderer for ApexRenderer {
    type Handle = ApexHandle;

    fn create(&mut self, spec: &ChartSpec) -> Result<ApexHandle, DashboardError> {
        let handle = ApexHandle {
            slot: spec.slot,
            revision: 0,
        };
        self.pending.push(RenderCommand {
            slot: spec.slot,
            action: RenderAction::Create,
            revision: handle.revision,
            options: chart_options(spec)?,
        });
        Ok(handle)
    }

    fn update(&mut self, handle: &mut ApexHandle, spec: &ChartSpec) -> Result<(), DashboardError> {
        let options = chart_options(spec)?;
        handle.revision += 1;
        self.pending.push(RenderCommand {
            slot: handle.slot,
            action: RenderAction::Update,
            revision: handle.revision,
            options,
        });
        Ok(())
    }
}

fn to_value<T: Serialize>(slot: ChartSlot, value: &T) -> Result<Value, DashboardError> {
    serde_json::to_value(value).map_err(|e| DashboardError::Render {
        slot: slot.id(),
        message: e.to_string(),
    })
}

fn apex_type(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "line",
        ChartKind::Bar | ChartKind::HorizontalBar | ChartKind::StackedBar => "bar",
        ChartKind::Donut => "donut",
        ChartKind::Heatmap => "heatmap",
        ChartKind::Scatter => "scatter",
    }
}

fn point_value(point: &DataPoint) -> Value {
    match point {
        DataPoint::Value { y } => json!(y),
        DataPoint::Labeled { x, y } => json!({ "x": x, "y": y }),
        DataPoint::Triple { x, y, z } => json!([x, y, z]),
    }
}

fn apex_series(spec: &ChartSpec) -> Value {
    // donuts take a flat list of values
    if spec.kind == ChartKind::Donut {
        let values: Vec<Value> = spec
            .series
            .iter()
            .flat_map(|s| s.data.iter().map(point_value))
            .collect();
        return Value::Array(values);
    }

    let series: Vec<Value> = spec
        .series
        .iter()
        .map(|Series { name, data }| {
            let mut entry = Map::new();
            if let Some(name) = name {
                entry.insert("name".to_string(), json!(name));
            }
            entry.insert(
                "data".to_string(),
                Value::Array(data.iter().map(point_value).collect()),
            );
            Value::Object(entry)
        })
        .collect();
    Value::Array(series)
}

fn tooltip_texts(spec: &ChartSpec) -> Vec<Vec<String>> {
    spec.series
        .iter()
        .enumerate()
        .map(|(si, s)| {
            (0..s.data.len())
                .filter_map(|pi| spec.tooltip_text(si, pi))
                .collect()
        })
        .collect()
}

/// ApexCharts options for one spec. Label and tooltip text is precomputed
/// here because formatter callbacks cannot travel as JSON; the page's
/// formatters look the strings up by index.
pub fn chart_options(spec: &ChartSpec) -> Result<Value, DashboardError> {
    let opts = &spec.options;

    let height = match opts.height {
        ChartHeight::Fill => json!("100%"),
        ChartHeight::Fixed(px) => json!(px),
    };
    let mut chart = json!({
        "type": apex_type(spec.kind),
        "height": height,
        "toolbar": { "show": opts.toolbar },
        "zoom": { "enabled": opts.zoom },
    });
    if opts.zoom {
        chart["zoom"]["type"] = json!("xy");
    }
    if spec.kind == ChartKind::StackedBar {
        chart["stacked"] = json!(true);
    }

    let mut options = Map::new();
    options.insert("chart".to_string(), chart);
    options.insert("series".to_string(), apex_series(spec));

    if let Some(title) = &spec.title {
        options.insert("title".to_string(), json!({ "text": title, "align": "left" }));
    }
    if let Some(subtitle) = &spec.subtitle {
        options.insert("subtitle".to_string(), json!({ "text": subtitle }));
    }

    if spec.kind == ChartKind::Donut {
        options.insert("labels".to_string(), to_value(spec.slot, &spec.x_axis.categories)?);
    } else {
        options.insert("xaxis".to_string(), axis_options(spec, &spec.x_axis)?);
        options.insert("yaxis".to_string(), axis_options(spec, &spec.y_axis)?);
    }

    let mut plot_bar = Map::new();
    if matches!(spec.kind, ChartKind::Bar | ChartKind::HorizontalBar | ChartKind::StackedBar) {
        plot_bar.insert("horizontal".to_string(), json!(spec.kind == ChartKind::HorizontalBar));
    }
    if let Some(width) = opts.column_width {
        plot_bar.insert("columnWidth".to_string(), json!(width));
        plot_bar.insert("endingShape".to_string(), json!("rounded"));
    }
    if opts.show_stack_totals {
        plot_bar.insert(
            "dataLabels".to_string(),
            json!({
                "total": {
                    "enabled": true,
                    "offsetX": 0,
                    "style": { "fontSize": "13px", "fontWeight": 900 },
                    "values": spec.stack_totals,
                }
            }),
        );
    }
    if !plot_bar.is_empty() {
        options.insert("plotOptions".to_string(), json!({ "bar": Value::Object(plot_bar) }));
    }

    let data_labels = match opts.data_labels {
        Some(format) => json!({
            "enabled": true,
            "format": to_value(spec.slot, &format)?,
            "text": spec.data_label_text(),
        }),
        None => json!({ "enabled": false }),
    };
    options.insert("dataLabels".to_string(), data_labels);

    if spec.kind == ChartKind::Line {
        let curve = if opts.smooth { "smooth" } else { "straight" };
        options.insert("stroke".to_string(), json!({ "curve": curve }));
        options.insert(
            "grid".to_string(),
            json!({ "row": { "colors": ["#f3f3f3", "transparent"], "opacity": 0.5 } }),
        );
    }

    let mut legend = Map::new();
    legend.insert("show".to_string(), json!(opts.legend.show));
    if let Some(position) = opts.legend.position {
        legend.insert("position".to_string(), json!(legend_position(position)));
    }
    if opts.legend.align_left {
        legend.insert("horizontalAlign".to_string(), json!("left"));
        legend.insert("offsetX".to_string(), json!(40));
    }
    options.insert("legend".to_string(), Value::Object(legend));

    if !opts.responsive.is_empty() {
        let responsive: Vec<Value> = opts
            .responsive
            .iter()
            .map(|b| {
                json!({
                    "breakpoint": b.max_width,
                    "options": {
                        "chart": { "width": "100%" },
                        "legend": { "position": legend_position(b.legend_position) },
                    }
                })
            })
            .collect();
        options.insert("responsive".to_string(), Value::Array(responsive));
    }

    if !opts.colors.is_empty() {
        options.insert("colors".to_string(), json!(opts.colors));
    }

    if !spec.annotations.is_empty() {
        let lines: Vec<Value> = spec
            .annotations
            .iter()
            .map(|a| {
                let mut line = json!({
                    "y": a.y,
                    "borderColor": a.color,
                    "label": {
                        "borderColor": a.color,
                        "style": { "color": "#fff", "background": a.color },
                        "text": a.label,
                    }
                });
                if a.dashed {
                    line["strokeDashArray"] = json!(4);
                }
                line
            })
            .collect();
        options.insert("annotations".to_string(), json!({ "yaxis": lines }));
    }

    let tooltip = match &opts.tooltip {
        Tooltip::Default => json!({ "enabled": true }),
        other => json!({
            "enabled": true,
            "kind": to_value(spec.slot, other)?,
            "text": tooltip_texts(spec),
        }),
    };
    options.insert("tooltip".to_string(), tooltip);

    if spec.is_empty() {
        options.insert("noData".to_string(), json!({ "text": NO_DATA_TEXT }));
    }

    if let Some(alert) = &spec.alert {
        options.insert("alert".to_string(), json!(alert));
    }

    Ok(Value::Object(options))
}

fn axis_options(spec: &ChartSpec, axis: &Axis) -> Result<Value, DashboardError> {
    let mut out = Map::new();
    match axis.kind {
        AxisKind::Category => {
            if !axis.categories.is_empty() || spec.kind != ChartKind::Scatter {
                out.insert("type".to_string(), json!("category"));
                out.insert("categories".to_string(), to_value(spec.slot, &axis.categories)?);
            }
            if axis.display_labels != axis.categories {
                out.insert("labels".to_string(), json!({ "display": axis.display_labels }));
            }
        }
        AxisKind::Numeric => {
            if spec.kind == ChartKind::Scatter {
                out.insert("type".to_string(), json!("numeric"));
            }
            if let Some(format) = axis.label_format {
                out.insert("labels".to_string(), json!({ "format": to_value(spec.slot, &format)? }));
            }
        }
    }
    if let Some(title) = &axis.title {
        out.insert("title".to_string(), json!({ "text": title }));
    }
    if let Some(min) = axis.min {
        out.insert("min".to_string(), json!(min));
    }
    if let Some(max) = axis.max {
        out.insert("max".to_string(), json!(max));
    }
    if let Some(ticks) = axis.tick_amount {
        out.insert("tickAmount".to_string(), json!(ticks));
    }
    Ok(Value::Object(out))
}

fn legend_position(position: LegendPosition) -> &'static str {
    match position {
        LegendPosition::Top => "top",
        LegendPosition::Bottom => "bottom",
    }
}
