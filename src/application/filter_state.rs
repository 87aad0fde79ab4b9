// Filter selection construction from raw page controls
use crate::domain::filters::{FilterOptions, FilterSelection, RawControlValues, TargetDefaults, ALL};
use chrono::{Datelike, NaiveDate};

/// Build a complete selection from whatever the page submitted.
///
/// Absent or blank categorical controls become `"All"`. The year falls back
/// to the current year when the backend knows it, otherwise to the most
/// recent year it reports. The end date falls back to December 31 of the
/// current year. Target text is passed through as entered.
pub fn build_filter_selection(
    raw: &RawControlValues,
    options: &FilterOptions,
    targets: &TargetDefaults,
    today: NaiveDate,
) -> FilterSelection {
    FilterSelection {
        year: present(&raw.year).unwrap_or_else(|| default_year(&options.years, today.year())),
        exam_event: or_all(&raw.exam_event),
        rlc_region: or_all(&raw.rlc_region),
        learner_district: or_all(&raw.learner_district),
        gender: or_all(&raw.gender),
        qualification: or_all(&raw.qualification),
        overall_target: present(&raw.overall_target).unwrap_or_else(|| targets.overall.clone()),
        manual_target: present(&raw.manual_target).unwrap_or_else(|| targets.manual.clone()),
        yoy_target: present(&raw.yoy_target).unwrap_or_else(|| targets.yoy.clone()),
        exam_event_end_date: present(&raw.exam_event_end_date)
            .unwrap_or_else(|| end_of_year(today).format("%Y-%m-%d").to_string()),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn or_all(value: &Option<String>) -> String {
    present(value).unwrap_or_else(|| ALL.to_string())
}

fn default_year(years: &[String], current_year: i32) -> String {
    let current = current_year.to_string();
    if years.iter().any(|y| y.trim() == current) {
        return current;
    }

    let most_recent = years
        .iter()
        .filter_map(|y| y.trim().parse::<i32>().ok().map(|n| (n, y)))
        .max_by_key(|(n, _)| *n)
        .map(|(_, y)| y.clone());

    most_recent
        .or_else(|| years.last().cloned())
        .unwrap_or_else(|| ALL.to_string())
}

fn end_of_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today)
}
