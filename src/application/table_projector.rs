// Underperformance table projection
use crate::domain::payload::TableRow;
use crate::domain::reported::parse_leading_float;
use crate::domain::table::{RankedRow, TableProjection};
use std::cmp::Ordering;

/// Centers below this completion percentage are underperforming.
pub const UNDERPERFORMING_BELOW: f64 = 90.0;
/// Centers below this completion percentage are flagged critical.
pub const CRITICAL_BELOW: f64 = 70.0;

/// Keep underperforming centers, lowest completion first. Equal completions
/// keep their input order. Rows whose completion does not parse are dropped.
pub fn project_table(rows: &[TableRow]) -> TableProjection {
    let mut ranked: Vec<RankedRow> = rows
        .iter()
        .filter_map(|row| {
            let completion = parse_leading_float(&row.completion_pct);
            (completion < UNDERPERFORMING_BELOW).then(|| RankedRow {
                row: row.clone(),
                completion,
                critical: completion < CRITICAL_BELOW,
            })
        })
        .collect();

    if ranked.is_empty() {
        return TableProjection::empty();
    }

    // sort_by is stable; NaN never passes the filter above
    ranked.sort_by(|a, b| a.completion.partial_cmp(&b.completion).unwrap_or(Ordering::Equal));
    TableProjection::Rows { rows: ranked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::fixtures::row;
    use crate::domain::table::NO_UNDERPERFORMERS_MESSAGE;
    use proptest::prelude::*;

    fn names(projection: &TableProjection) -> Vec<&str> {
        projection.rows().iter().map(|r| r.row.center_name.as_str()).collect()
    }

    #[test]
    fn test_scenario_ties_keep_input_order() {
        let rows = vec![row("A", "65"), row("B", "65"), row("C", "95")];
        let projection = project_table(&rows);
        assert_eq!(names(&projection), vec!["A", "B"]);
        assert!(projection.rows().iter().all(|r| r.critical));
    }

    #[test]
    fn test_signed_zero_ties_keep_input_order() {
        let rows = vec![row("A", "0"), row("B", "-0")];
        assert_eq!(names(&project_table(&rows)), vec!["A", "B"]);
    }

    #[test]
    fn test_sorted_ascending_with_flags() {
        let rows = vec![row("A", "85"), row("B", "60.5"), row("C", "89.99"), row("D", "70")];
        let projection = project_table(&rows);
        assert_eq!(names(&projection), vec!["B", "D", "A", "C"]);
        let flags: Vec<bool> = projection.rows().iter().map(|r| r.critical).collect();
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn test_boundary_ninety_excluded() {
        let projection = project_table(&[row("A", "90"), row("B", "90.0%")]);
        assert!(projection.is_empty());
    }

    #[test]
    fn test_unparsable_completion_dropped() {
        let projection = project_table(&[row("A", "n/a"), row("B", "50")]);
        assert_eq!(names(&projection), vec!["B"]);
    }

    #[test]
    fn test_empty_marker() {
        assert_eq!(
            project_table(&[]),
            TableProjection::Empty {
                message: NO_UNDERPERFORMERS_MESSAGE
            }
        );
        assert!(project_table(&[row("A", "99")]).is_empty());
    }

    fn arb_rows() -> impl Strategy<Value = Vec<TableRow>> {
        prop::collection::vec(0u32..1200, 0..40).prop_map(|pcts| {
            pcts.into_iter()
                .enumerate()
                .map(|(i, p)| row(&format!("Center {}", i), &format!("{}", p as f64 / 10.0)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_projection_is_idempotent(rows in arb_rows()) {
            let first = project_table(&rows);
            let again: Vec<TableRow> = first.rows().iter().map(|r| r.row.clone()).collect();
            prop_assert_eq!(project_table(&again), first);
        }

        #[test]
        fn prop_projection_is_ordered_and_stable(rows in arb_rows()) {
            let projection = project_table(&rows);
            let position = |name: &str| rows.iter().position(|r| r.center_name == name).unwrap();

            for pair in projection.rows().windows(2) {
                prop_assert!(pair[0].completion <= pair[1].completion);
                if pair[0].completion == pair[1].completion {
                    prop_assert!(position(&pair[0].row.center_name) < position(&pair[1].row.center_name));
                }
            }
            for ranked in projection.rows() {
                prop_assert!(ranked.completion < UNDERPERFORMING_BELOW);
                prop_assert_eq!(ranked.critical, ranked.completion < CRITICAL_BELOW);
            }
            let survivors = rows
                .iter()
                .filter(|r| parse_leading_float(&r.completion_pct) < UNDERPERFORMING_BELOW)
                .count();
            prop_assert_eq!(projection.rows().len(), survivors);
            prop_assert_eq!(projection.is_empty(), survivors == 0);
        }
    }
}
