//! Per-date index of already-scheduled exam occurrences.
//!
//! The index is the engine's working structure: each confirmed exam slot
//! becomes one entry carrying the date, the resolved moment id (if any), and
//! the subject weight for the exam's type. The base index is built once per
//! engine call and snapshotted with a plain `clone()` for every simulated
//! insertion, so candidates never interfere with one another.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// One scheduled exam occurrence on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub date: NaiveDate,
    /// Resolved moment id, or `None` when no moment matched the slot.
    pub moment: Option<String>,
    /// Subject weight for the exam's type (not multiplied by moment weight).
    pub weight: f64,
}

/// Date-keyed index of scheduled exam entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarIndex {
    days: BTreeMap<NaiveDate, Vec<IndexEntry>>,
}

impl CalendarIndex {
    /// Build the base index from the catalog.
    ///
    /// Every subject, exam, and confirmed slot yields one entry; no slot is
    /// skipped. A slot whose time matches no moment keeps `moment: None` and
    /// is still scored with the neutral weight.
    pub fn build(catalog: &Catalog) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<IndexEntry>> = BTreeMap::new();

        for subject in catalog.subjects.values() {
            for exam in &subject.exams {
                let weight = subject.weight_for(exam.exam_type.as_deref());
                for slot in &exam.slots {
                    let moment = catalog
                        .resolve_moment(&slot.time, slot.date.weekday())
                        .map(str::to_owned);
                    days.entry(slot.date).or_default().push(IndexEntry {
                        date: slot.date,
                        moment,
                        weight,
                    });
                }
            }
        }

        Self { days }
    }

    /// Append an entry at a date, creating the date bucket if new.
    pub fn insert(&mut self, entry: IndexEntry) {
        self.days.entry(entry.date).or_default().push(entry);
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<IndexEntry>> {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
