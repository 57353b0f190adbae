//! Recommendation engine: simulate-then-score candidate dates.
//!
//! For each candidate the engine clones the base calendar index, inserts the
//! exam being placed, recomputes the day and week aggregates with their
//! penalties, and collects one raw cost. Costs are then normalized into
//! 0..100 scores and ranked. The whole pass is synchronous, deterministic,
//! and free of I/O; it never fails on a well-formed catalog.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::index::{CalendarIndex, IndexEntry};
use crate::penalty::{
    consecutive_moment_penalty, day_imbalance_penalty, proximity_penalty, week_imbalance_penalty,
    PenaltyFactors,
};
use crate::score::{normalize, ScoredCandidate};
use crate::week::group_by_iso_week;

/// A date (optionally with a time range) under evaluation.
///
/// Candidates without a date are silently dropped from the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Time range as "HH:MM-HH:MM"; used to resolve the candidate's moment.
    #[serde(default)]
    pub time: Option<String>,
}

impl Candidate {
    pub fn new(date: NaiveDate, time: Option<String>) -> Self {
        Self {
            date: Some(date),
            time,
        }
    }
}

/// The exam awaiting placement.
///
/// The weight is resolved from the subject's weight table by the caller;
/// when absent the engine falls back to neutral 1.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudiedExam {
    /// Known moment id, used when a candidate carries no time.
    #[serde(default)]
    pub moment: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Scores candidate dates against the existing exam calendar.
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    factors: PenaltyFactors,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            factors: PenaltyFactors::default(),
        }
    }

    pub fn with_factors(catalog: &'a Catalog, factors: PenaltyFactors) -> Self {
        Self { catalog, factors }
    }

    /// Score every candidate from 0 (worst) to 100 (best).
    ///
    /// Results are sorted by descending score, then ascending date as the
    /// explicit tie-break. Candidates without a date are dropped; an empty
    /// candidate list yields an empty result.
    pub fn recommend(
        &self,
        candidates: &[Candidate],
        exam: &StudiedExam,
    ) -> Vec<ScoredCandidate> {
        let base = CalendarIndex::build(self.catalog);

        let mut results: Vec<(NaiveDate, f64)> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(date) = candidate.date else {
                continue;
            };
            let cost = self.raw_cost(&base, date, candidate.time.as_deref(), exam);
            results.push((date, cost));
        }

        let mut scored = normalize(results);
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.date.cmp(&b.date))
        });
        scored
    }

    /// Simulate placing the exam on `date` and compute the aggregate cost.
    fn raw_cost(
        &self,
        base: &CalendarIndex,
        date: NaiveDate,
        time: Option<&str>,
        exam: &StudiedExam,
    ) -> f64 {
        // Candidate's own moment wins over the exam's supplied one
        let candidate_moment = time
            .and_then(|t| self.catalog.resolve_moment(t, date.weekday()))
            .map(str::to_owned);
        let moment = candidate_moment.or_else(|| exam.moment.clone());
        let weight = exam.weight.unwrap_or(1.0);

        let mut days = base.clone();
        days.insert(IndexEntry {
            date,
            moment,
            weight,
        });

        let day_weights: std::collections::BTreeMap<NaiveDate, f64> = days
            .days()
            .iter()
            .map(|(day, entries)| (*day, self.day_weight(entries)))
            .collect();

        let weight_weeks = group_by_iso_week(&day_weights);
        let entry_weeks = group_by_iso_week(days.days());

        let mut week_totals = Vec::with_capacity(weight_weeks.len());
        for (weights, entries) in weight_weeks.iter().zip(&entry_weeks) {
            let day_values: Vec<f64> = weights.values().copied().collect();
            let week_entries: Vec<&IndexEntry> = entries.values().flatten().collect();

            let total = day_values.iter().sum::<f64>()
                + day_imbalance_penalty(&day_values, self.factors.day_imbalance)
                + proximity_penalty(&week_entries, self.factors.proximity);
            week_totals.push(total);
        }

        week_totals.iter().sum::<f64>()
            + week_imbalance_penalty(&week_totals, self.factors.week_imbalance)
    }

    /// Weighted load for one day: entry weight times moment multiplier,
    /// plus the consecutive-moment penalty for that day.
    fn day_weight(&self, entries: &[IndexEntry]) -> f64 {
        let load: f64 = entries
            .iter()
            .map(|e| e.weight * self.catalog.moment_weight(e.moment.as_deref()))
            .sum();
        load + consecutive_moment_penalty(entries, self.factors.consecutive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Exam, ExamDuration, ExamSlot, Moment, Subject};
    use chrono::Weekday;
    use uuid::Uuid;

    fn moment(weekday: Weekday, time: &str, weight: f64) -> Moment {
        Moment {
            weekday,
            time: time.to_string(),
            weight,
        }
    }

    fn busy_catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog
            .moments
            .insert("3".to_string(), moment(Weekday::Mon, "08:00-09:00", 1.0));
        catalog
            .moments
            .insert("4".to_string(), moment(Weekday::Mon, "09:00-10:00", 1.0));
        catalog
            .moments
            .insert("5".to_string(), moment(Weekday::Wed, "11:00-12:00", 1.0));
        catalog.subjects.insert(
            "physics".to_string(),
            Subject {
                weights: vec![2.0],
                exam_types: vec![],
                moments: vec!["3".to_string(), "4".to_string(), "5".to_string()],
                exams: vec![Exam {
                    id: Uuid::new_v4(),
                    exam_type: None,
                    slots: vec![
                        ExamSlot {
                            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                            time: "08:00-09:00".to_string(),
                        },
                        ExamSlot {
                            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                            time: "09:00-10:00".to_string(),
                        },
                    ],
                    duration: ExamDuration::TwoHours,
                }],
            },
        );
        catalog
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_candidate_list_returns_empty() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let scored = engine.recommend(&[], &StudiedExam::default());
        assert!(scored.is_empty());
    }

    #[test]
    fn dateless_candidates_are_dropped() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let candidates = vec![
            Candidate::default(),
            Candidate::new(date(2025, 2, 10), None),
        ];
        let scored = engine.recommend(&candidates, &StudiedExam::default());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].date, date(2025, 2, 10));
    }

    #[test]
    fn single_candidate_scores_fifty() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let scored = engine.recommend(
            &[Candidate::new(date(2025, 2, 10), None)],
            &StudiedExam::default(),
        );
        assert_eq!(scored[0].score, 50.0);
    }

    #[test]
    fn distant_date_beats_crowded_day() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);

        // Same day as the two existing slots vs. three weeks later
        let crowded = Candidate::new(date(2025, 2, 3), None);
        let distant = Candidate::new(date(2025, 2, 24), None);
        let scored = engine.recommend(
            &[crowded, distant],
            &StudiedExam {
                moment: None,
                weight: Some(2.0),
            },
        );

        assert_eq!(scored[0].date, date(2025, 2, 24));
        assert_eq!(scored[0].score, 100.0);
        assert_eq!(scored[1].date, date(2025, 2, 3));
        assert_eq!(scored[1].score, 0.0);
    }

    #[test]
    fn candidate_time_resolves_its_moment() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);

        // With a time, the candidate resolves to moment "4", duplicating an
        // existing ordinal. Without one, the exam's supplied "5" applies and
        // extends the consecutive run instead. The two costs must differ.
        let exam = StudiedExam {
            moment: Some("5".to_string()),
            weight: Some(1.0),
        };
        let base = CalendarIndex::build(&catalog);
        let cost_resolved =
            engine.raw_cost(&base, date(2025, 2, 3), Some("09:00-10:00"), &exam);
        let cost_supplied = engine.raw_cost(&base, date(2025, 2, 3), None, &exam);
        assert_ne!(cost_resolved, cost_supplied);
    }

    #[test]
    fn unresolvable_candidate_is_still_scored() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let scored = engine.recommend(
            &[
                Candidate::new(date(2025, 2, 11), Some("22:00-23:00".to_string())),
                Candidate::new(date(2025, 2, 3), None),
            ],
            &StudiedExam::default(),
        );
        assert_eq!(scored.len(), 2);
    }

    #[test]
    fn recommend_is_idempotent() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let candidates = vec![
            Candidate::new(date(2025, 2, 3), None),
            Candidate::new(date(2025, 2, 12), None),
            Candidate::new(date(2025, 2, 24), None),
        ];
        let exam = StudiedExam {
            moment: None,
            weight: Some(3.0),
        };

        let first = engine.recommend(&candidates, &exam);
        let second = engine.recommend(&candidates, &exam);
        assert_eq!(first, second);
    }

    #[test]
    fn candidates_do_not_interfere() {
        let catalog = busy_catalog();
        let engine = RecommendationEngine::new(&catalog);
        let base_before = CalendarIndex::build(&catalog);

        engine.recommend(
            &[
                Candidate::new(date(2025, 2, 3), None),
                Candidate::new(date(2025, 2, 4), None),
            ],
            &StudiedExam::default(),
        );

        let base_after = CalendarIndex::build(&catalog);
        assert_eq!(base_before, base_after);
    }

    #[test]
    fn ties_break_by_ascending_date() {
        // Empty calendar: two far-apart candidates carry identical costs
        let catalog = Catalog::default();
        let engine = RecommendationEngine::new(&catalog);
        let scored = engine.recommend(
            &[
                Candidate::new(date(2025, 6, 20), None),
                Candidate::new(date(2025, 6, 2), None),
            ],
            &StudiedExam::default(),
        );
        assert_eq!(scored[0].date, date(2025, 6, 2));
        assert_eq!(scored[1].date, date(2025, 6, 20));
        assert!(scored.iter().all(|s| s.score == 50.0));
    }
}
