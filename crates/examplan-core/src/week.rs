//! ISO-week bucketing of date-keyed mappings.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Group a date-keyed mapping into ISO (year, week) buckets, ascending.
///
/// Generic over the value so the per-day weight map and the per-day entry
/// map of one evaluation bucket identically: both derive from the same date
/// set, so the i-th week of one corresponds to the i-th week of the other.
pub fn group_by_iso_week<V: Clone>(
    days: &BTreeMap<NaiveDate, V>,
) -> Vec<BTreeMap<NaiveDate, V>> {
    let mut weeks: BTreeMap<(i32, u32), BTreeMap<NaiveDate, V>> = BTreeMap::new();
    for (date, value) in days {
        let iso = date.iso_week();
        weeks
            .entry((iso.year(), iso.week()))
            .or_default()
            .insert(*date, value.clone());
    }
    weeks.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_by_iso_week_in_order() {
        let mut days = BTreeMap::new();
        days.insert(date(2025, 1, 6), 1.0); // ISO week 2
        days.insert(date(2025, 1, 10), 2.0); // ISO week 2
        days.insert(date(2025, 1, 13), 3.0); // ISO week 3
        days.insert(date(2025, 1, 1), 4.0); // ISO week 1

        let weeks = group_by_iso_week(&days);
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].len(), 1);
        assert!(weeks[0].contains_key(&date(2025, 1, 1)));
        assert_eq!(weeks[1].len(), 2);
        assert_eq!(weeks[2].len(), 1);
    }

    #[test]
    fn iso_year_boundary_splits_correctly() {
        // 2024-12-30 and 2025-01-02 both fall in ISO week 1 of 2025
        let mut days = BTreeMap::new();
        days.insert(date(2024, 12, 30), 1.0);
        days.insert(date(2025, 1, 2), 2.0);
        // 2024-12-29 is a Sunday, ISO week 52 of 2024
        days.insert(date(2024, 12, 29), 3.0);

        let weeks = group_by_iso_week(&days);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].len(), 1);
        assert_eq!(weeks[1].len(), 2);
    }

    #[test]
    fn empty_input_yields_no_weeks() {
        let days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        assert!(group_by_iso_week(&days).is_empty());
    }
}
