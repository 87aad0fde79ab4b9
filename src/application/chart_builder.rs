// Chart spec builders - one pure mapping per chart slot
use crate::domain::chart::{
    Annotation, Axis, Breakpoint, ChartHeight, ChartKind, ChartSlot, ChartSpec, DataPoint, Legend,
    LegendPosition, Series, Tooltip, ValueFormat, CHART_COUNT,
};
use crate::domain::payload::{
    CategoryPoint, CategorySeries, ChartData, ExamEventPrediction, Heatmap, NamedSeries, ScatterSeries,
};
use crate::domain::reported::format_grouped;

/// The low-completion chart shows at most this many centers.
pub const LOW_COMPLETION_LIMIT: usize = 10;
/// Completion percentage marking the performance target.
pub const COMPLETION_TARGET: f64 = 90.0;
/// Printed label budget for the heatmap's demographic axis.
pub const DEMOGRAPHIC_LABEL_BUDGET: usize = 10;
/// Printed label budget for the heatmap's geographic axis.
pub const GEOGRAPHIC_LABEL_BUDGET: usize = 15;

const ADMISSIONS_SUFFIX: &str = " admissions";
const TARGET_LINE_COLOR: &str = "#00E396";
const COMPLETION_LINE_COLOR: &str = "#dc3545";
const HEATMAP_COLOR: &str = "#008FFB";
const DONUT_BREAKPOINT: u32 = 480;

/// Build every chart spec in slot order.
pub fn build_all(data: &ChartData) -> [ChartSpec; CHART_COUNT] {
    [
        admissions_trend(&data.admissions_trend),
        admissions_by_region(&data.admissions_by_rlc_region),
        gender_distribution(&data.gender_distribution),
        admissions_by_qualification(&data.admissions_by_qualification),
        low_completion_centers(&data.low_completion_centers),
        exam_event_prediction(&data.exam_event_prediction),
        admissions_heatmap(&data.admissions_heatmap),
        center_performance(&data.alc_llc_bubble_chart),
        admissions_by_age_group(&data.admissions_by_age_group),
        region_gender_stack(&data.admissions_trend_per_region_gender),
    ]
}

fn value_series(series: &[NamedSeries]) -> Vec<Series> {
    series
        .iter()
        .map(|s| {
            Series::new(
                Some(s.name.clone()),
                s.data.iter().map(|&y| DataPoint::Value { y }).collect(),
            )
        })
        .collect()
}

fn labeled_series(name: Option<&str>, points: &[CategoryPoint]) -> Series {
    Series::new(
        name.map(str::to_string),
        points
            .iter()
            .map(|p| DataPoint::Labeled {
                x: p.x.clone(),
                y: p.y,
            })
            .collect(),
    )
}

fn point_labels(points: &[CategoryPoint]) -> Vec<String> {
    points.iter().map(|p| p.x.clone()).collect()
}

/// Vertical bars whose categories come from the points themselves.
fn category_bar(slot: ChartSlot, points: &[CategoryPoint]) -> ChartSpec {
    let mut spec = ChartSpec::new(slot, ChartKind::Bar);
    spec.series = vec![labeled_series(None, points)];
    spec.x_axis = Axis::category(point_labels(points));
    spec.y_axis = Axis::numeric().titled("Admissions");
    spec.options.column_width = Some("55%");
    spec
}

pub fn admissions_trend(trend: &CategorySeries) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::AdmissionsTrend, ChartKind::Line);
    spec.title = Some("Monthly Admissions".to_string());
    spec.series = value_series(&trend.series);
    spec.x_axis = Axis::category(trend.categories.clone());
    spec.options.smooth = true;
    spec
}

pub fn admissions_by_region(points: &[CategoryPoint]) -> ChartSpec {
    let mut spec = category_bar(ChartSlot::AdmissionsByRegion, points);
    spec.options.tooltip = Tooltip::ValueSuffix {
        suffix: ADMISSIONS_SUFFIX,
    };
    spec
}

pub fn gender_distribution(points: &[CategoryPoint]) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::GenderDistribution, ChartKind::Donut);
    spec.series = vec![Series::new(
        None,
        points.iter().map(|p| DataPoint::Value { y: p.y }).collect(),
    )];
    spec.x_axis = Axis::category(point_labels(points));
    // legend sits at the bottom at every width, not only below the breakpoint
    spec.options.legend = Legend {
        show: true,
        position: Some(LegendPosition::Bottom),
        align_left: false,
    };
    spec.options.responsive = vec![Breakpoint {
        max_width: DONUT_BREAKPOINT,
        legend_position: LegendPosition::Bottom,
    }];
    spec
}

pub fn admissions_by_qualification(points: &[CategoryPoint]) -> ChartSpec {
    let mut spec = category_bar(ChartSlot::AdmissionsByQualification, points);
    spec.options.tooltip = Tooltip::ValueSuffix {
        suffix: ADMISSIONS_SUFFIX,
    };
    spec
}

pub fn low_completion_centers(points: &[CategoryPoint]) -> ChartSpec {
    let points = &points[..points.len().min(LOW_COMPLETION_LIMIT)];

    let mut spec = ChartSpec::new(ChartSlot::LowCompletionCenters, ChartKind::HorizontalBar);
    spec.title = Some("Top 10 Underperforming Centers (<90% Completion)".to_string());
    spec.series = vec![labeled_series(Some("Completion %"), points)];
    spec.x_axis = Axis::category(point_labels(points))
        .titled("Completion %")
        .bounded(None, Some(100.0));
    spec.y_axis = Axis::numeric().titled("Center");
    spec.options.height = ChartHeight::Fixed(250);
    spec.options.data_labels = Some(ValueFormat::Percent);
    spec
}

pub fn exam_event_prediction(prediction: &ExamEventPrediction) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::ExamEventPrediction, ChartKind::Bar);
    spec.series = value_series(&prediction.series);
    spec.x_axis = Axis::category(vec!["Admissions".to_string()]);
    spec.y_axis = Axis::numeric().titled("Number of Admissions");
    spec.annotations = vec![Annotation {
        y: prediction.displayed_target,
        color: TARGET_LINE_COLOR,
        label: format!("Target: {}", format_grouped(prediction.displayed_target)),
        dashed: false,
    }];
    spec.alert = Some(prediction.target_alert.clone());
    spec.options.column_width = Some("50%");
    spec.options.tooltip = Tooltip::ValueSuffix {
        suffix: ADMISSIONS_SUFFIX,
    };
    spec
}

pub fn admissions_heatmap(heatmap: &Heatmap) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::AdmissionsHeatmap, ChartKind::Heatmap);
    spec.title = Some("Admissions Heatmap (Region vs. Qualification)".to_string());
    spec.series = heatmap
        .series
        .iter()
        .map(|row| labeled_series(Some(&row.name), &row.data))
        .collect();
    spec.x_axis = Axis::category(heatmap.demo_categories.clone()).truncated(DEMOGRAPHIC_LABEL_BUDGET);
    spec.y_axis = Axis::category(heatmap.geo_categories.clone()).truncated(GEOGRAPHIC_LABEL_BUDGET);
    spec.options.colors = vec![HEATMAP_COLOR];
    spec.options.tooltip = Tooltip::HeatmapCell;
    spec
}

pub fn center_performance(centers: &[ScatterSeries]) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::CenterPerformance, ChartKind::Scatter);
    spec.title = Some("Center Performance Matrix: Completion Rate vs. Average Age".to_string());
    spec.subtitle = Some(
        "Hover on a point for center details. Lines show median age & 90% completion.".to_string(),
    );
    spec.series = centers
        .iter()
        .map(|center| {
            Series::new(
                Some(center.name.clone()),
                center
                    .data
                    .iter()
                    .map(|&[x, y, z]| DataPoint::Triple { x, y, z })
                    .collect(),
            )
        })
        .collect();

    let mut x_axis = Axis::numeric().titled("Average Learner Age");
    x_axis.label_format = Some(ValueFormat::Integer);
    spec.x_axis = x_axis;

    let mut y_axis = Axis::numeric()
        .titled("Completion Rate (%)")
        .bounded(Some(0.0), Some(100.0));
    y_axis.tick_amount = Some(5);
    y_axis.label_format = Some(ValueFormat::IntegerPercent);
    spec.y_axis = y_axis;

    spec.annotations = vec![Annotation {
        y: COMPLETION_TARGET,
        color: COMPLETION_LINE_COLOR,
        label: "90% Target".to_string(),
        dashed: true,
    }];
    spec.options.toolbar = true;
    spec.options.zoom = true;
    spec.options.legend.show = false;
    spec.options.tooltip = Tooltip::CenterDetails;
    spec
}

pub fn admissions_by_age_group(points: &[CategoryPoint]) -> ChartSpec {
    let mut spec = category_bar(ChartSlot::AdmissionsByAgeGroup, points);
    spec.title = Some("Admissions by Age Group".to_string());
    spec
}

pub fn region_gender_stack(stack: &CategorySeries) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartSlot::RegionGenderStack, ChartKind::StackedBar);
    spec.title = Some("Admissions by RLC Region and Gender".to_string());
    spec.series = value_series(&stack.series);
    spec.x_axis = Axis::category(stack.categories.clone()).titled("RLC Region");
    spec.y_axis = Axis::numeric().titled("Number of Admissions");
    spec.stack_totals = stack_totals(stack);
    spec.options.show_stack_totals = true;
    spec.options.tooltip = Tooltip::ValueSuffix {
        suffix: ADMISSIONS_SUFFIX,
    };
    spec.options.legend = Legend {
        show: true,
        position: Some(LegendPosition::Top),
        align_left: true,
    };
    spec
}

/// Sum each category across every stacked series. Series shorter than the
/// category list contribute nothing to the missing positions.
fn stack_totals(stack: &CategorySeries) -> Vec<f64> {
    let width = stack
        .series
        .iter()
        .map(|s| s.data.len())
        .max()
        .unwrap_or(0)
        .max(stack.categories.len());

    (0..width)
        .map(|i| stack.series.iter().filter_map(|s| s.data.get(i)).sum::<f64>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::{fixtures, HeatmapRow};
    use proptest::prelude::*;

    #[test]
    fn test_build_all_slot_order() {
        let specs = build_all(&fixtures::chart_data());
        let slots: Vec<ChartSlot> = specs.iter().map(|s| s.slot).collect();
        assert_eq!(slots, ChartSlot::ALL.to_vec());
    }

    #[test]
    fn test_build_all_is_deterministic() {
        let data = fixtures::chart_data();
        assert_eq!(build_all(&data), build_all(&data));
    }

    // NaN never equals itself, so a malformed target is compared by its
    // serialized form, where it becomes null.
    #[test]
    fn test_nan_target_is_stable_when_serialized() {
        let mut data = fixtures::chart_data();
        data.exam_event_prediction.displayed_target = f64::NAN;
        let first = serde_json::to_value(build_all(&data)).unwrap();
        let second = serde_json::to_value(build_all(&data)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_series_yield_empty_specs() {
        let specs = build_all(&fixtures::empty_chart_data());
        for spec in &specs {
            assert!(spec.is_empty(), "{:?} should be empty", spec.slot);
        }
        assert!(specs[9].stack_totals.is_empty());
    }

    #[test]
    fn test_region_bar_categories_from_points() {
        let spec = admissions_by_region(&fixtures::chart_data().admissions_by_rlc_region);
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.x_axis.categories, vec!["Pune", "Nagpur"]);
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.tooltip_text(0, 1).as_deref(), Some("250 admissions"));
    }

    #[test]
    fn test_gender_donut_legend_forced_bottom() {
        let spec = gender_distribution(&fixtures::chart_data().gender_distribution);
        assert_eq!(spec.x_axis.categories, vec!["Male", "Female"]);
        assert_eq!(spec.series[0].data, vec![DataPoint::Value { y: 560.0 }, DataPoint::Value { y: 440.0 }]);
        assert_eq!(spec.options.legend.position, Some(LegendPosition::Bottom));
    }

    #[test]
    fn test_low_completion_limited_and_bounded() {
        let points: Vec<CategoryPoint> = (0..14)
            .map(|i| fixtures::point(format!("Center {}", i), 40.0 + i as f64))
            .collect();
        let spec = low_completion_centers(&points);
        assert_eq!(spec.series[0].data.len(), LOW_COMPLETION_LIMIT);
        assert_eq!(spec.x_axis.max, Some(100.0));
        assert_eq!(spec.data_label_text()[0][0], "40%");
        assert_eq!(spec.options.height, ChartHeight::Fixed(250));
    }

    #[test]
    fn test_exam_event_prediction_annotation_and_alert() {
        let spec = exam_event_prediction(&fixtures::chart_data().exam_event_prediction);
        assert_eq!(spec.x_axis.categories, vec!["Admissions"]);
        assert_eq!(spec.annotations.len(), 1);
        assert_eq!(spec.annotations[0].y, 1200.0);
        assert_eq!(spec.annotations[0].label, "Target: 1,200");
        assert_eq!(spec.alert.as_deref(), Some("Prediction is below the event target."));
    }

    #[test]
    fn test_heatmap_truncates_display_only() {
        let spec = admissions_heatmap(&fixtures::chart_data().admissions_heatmap);
        assert_eq!(spec.x_axis.categories[1], "Post Graduate Diploma");
        assert_eq!(spec.x_axis.display_labels[1], "Post Gradu...");
        assert_eq!(spec.y_axis.display_labels[0], "Pune");
        assert_eq!(
            spec.tooltip_text(0, 1).as_deref(),
            Some("Region: Pune, Qualification: Post Graduate Diploma, Admissions: 40")
        );
    }

    #[test]
    fn test_scatter_carries_admissions() {
        let spec = center_performance(&fixtures::chart_data().alc_llc_bubble_chart);
        assert_eq!(spec.series[0].data[0], DataPoint::Triple { x: 24.0, y: 55.0, z: 80.0 });
        assert_eq!(spec.annotations[0].y, COMPLETION_TARGET);
        assert!(spec.annotations[0].dashed);
        assert_eq!(
            spec.tooltip_text(0, 0).as_deref(),
            Some("Center A\nCompletion Rate: 55%\nAverage Age: 24\nTotal Admissions: 80")
        );
        assert!(spec.tooltip_text(0, 1).is_none());
    }

    #[test]
    fn test_age_group_has_no_axis_max() {
        let spec = admissions_by_age_group(&fixtures::chart_data().admissions_by_age_group);
        assert_eq!(spec.x_axis.max, None);
        assert_eq!(spec.y_axis.max, None);
        assert_eq!(spec.x_axis.categories, vec!["18-25", "26-35"]);
    }

    #[test]
    fn test_stack_totals() {
        let spec = region_gender_stack(&fixtures::chart_data().admissions_trend_per_region_gender);
        assert_eq!(spec.kind, ChartKind::StackedBar);
        assert_eq!(spec.stack_totals, vec![400.0, 250.0]);
    }

    #[test]
    fn test_stack_totals_with_ragged_series() {
        let stack = CategorySeries {
            categories: vec!["A".into(), "B".into(), "C".into()],
            series: vec![fixtures::named("Male", vec![1.0, 2.0]), fixtures::named("Female", vec![3.0])],
        };
        assert_eq!(stack_totals(&stack), vec![4.0, 2.0, 0.0]);
    }

    fn label() -> impl Strategy<Value = String> {
        "[A-Za-z ]{0,30}"
    }

    fn value() -> impl Strategy<Value = f64> {
        -1.0e6f64..1.0e6
    }

    fn points(max: usize) -> impl Strategy<Value = Vec<CategoryPoint>> {
        prop::collection::vec((label(), value()).prop_map(|(x, y)| fixtures::point(x, y)), 0..max)
    }

    fn named_series() -> impl Strategy<Value = NamedSeries> {
        (label(), prop::collection::vec(value(), 0..8)).prop_map(|(name, data)| fixtures::named(&name, data))
    }

    // series lengths vary independently of the category count
    fn category_series() -> impl Strategy<Value = CategorySeries> {
        (
            prop::collection::vec(label(), 0..8),
            prop::collection::vec(named_series(), 0..4),
        )
            .prop_map(|(categories, series)| CategorySeries { categories, series })
    }

    fn heatmap() -> impl Strategy<Value = Heatmap> {
        (
            prop::collection::vec((label(), points(6)).prop_map(|(name, data)| HeatmapRow { name, data }), 0..5),
            prop::collection::vec(label(), 0..6),
            prop::collection::vec(label(), 0..5),
        )
            .prop_map(|(series, demo_categories, geo_categories)| Heatmap {
                series,
                demo_categories,
                geo_categories,
            })
    }

    fn prediction() -> impl Strategy<Value = ExamEventPrediction> {
        (prop::collection::vec(named_series(), 0..3), value(), label()).prop_map(
            |(series, displayed_target, target_alert)| ExamEventPrediction {
                series,
                displayed_target,
                target_alert,
            },
        )
    }

    fn scatter() -> impl Strategy<Value = Vec<ScatterSeries>> {
        prop::collection::vec(
            (label(), prop::collection::vec([value(), value(), value()], 0..4))
                .prop_map(|(name, data)| ScatterSeries { name, data }),
            0..5,
        )
    }

    fn chart_data() -> impl Strategy<Value = ChartData> {
        (
            category_series(),
            points(8),
            points(4),
            points(8),
            points(25),
            prediction(),
            heatmap(),
            scatter(),
            points(6),
            category_series(),
        )
            .prop_map(
                |(
                    admissions_trend,
                    admissions_by_rlc_region,
                    gender_distribution,
                    admissions_by_qualification,
                    low_completion_centers,
                    exam_event_prediction,
                    admissions_heatmap,
                    alc_llc_bubble_chart,
                    admissions_by_age_group,
                    admissions_trend_per_region_gender,
                )| ChartData {
                    admissions_trend,
                    admissions_by_rlc_region,
                    gender_distribution,
                    admissions_by_qualification,
                    low_completion_centers,
                    exam_event_prediction,
                    admissions_heatmap,
                    alc_llc_bubble_chart,
                    admissions_by_age_group,
                    admissions_trend_per_region_gender,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_build_all_is_deterministic(data in chart_data()) {
            let first = build_all(&data);
            prop_assert_eq!(&first, &build_all(&data.clone()));

            for (spec, slot) in first.iter().zip(ChartSlot::ALL) {
                prop_assert_eq!(spec.slot, slot);
            }
        }

        #[test]
        fn prop_low_completion_never_exceeds_limit(centers in points(25)) {
            let spec = low_completion_centers(&centers);
            let shown: usize = spec.series.iter().map(|s| s.data.len()).sum();
            prop_assert_eq!(shown, centers.len().min(LOW_COMPLETION_LIMIT));
        }

        #[test]
        fn prop_heatmap_labels_fit_budget(grid in heatmap()) {
            let spec = admissions_heatmap(&grid);
            prop_assert_eq!(&spec.x_axis.categories, &grid.demo_categories);
            for text in &spec.x_axis.display_labels {
                prop_assert!(text.chars().count() <= DEMOGRAPHIC_LABEL_BUDGET + 3);
            }
            for text in &spec.y_axis.display_labels {
                prop_assert!(text.chars().count() <= GEOGRAPHIC_LABEL_BUDGET + 3);
            }
        }

        #[test]
        fn prop_stack_totals_cover_every_category(stack in category_series()) {
            let totals = stack_totals(&stack);
            let longest = stack.series.iter().map(|s| s.data.len()).max().unwrap_or(0);
            prop_assert_eq!(totals.len(), stack.categories.len().max(longest));
        }
    }
}
