//! Penalty heuristics for candidate evaluation.
//!
//! Four independent, pure penalty functions operating on day- and week-level
//! aggregates. All of them degrade to zero rather than failing: the engine
//! never errors on malformed moment ids or degenerate value lists.

use serde::{Deserialize, Serialize};

use crate::index::IndexEntry;

/// Tunable factor per penalty term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyFactors {
    /// Factor for the consecutive-moment clustering penalty
    pub consecutive: f64,
    /// Factor for intra-week day imbalance
    pub day_imbalance: f64,
    /// Factor for inter-week imbalance
    pub week_imbalance: f64,
    /// Factor for pairwise proximity of heavy exams
    pub proximity: f64,
}

impl Default for PenaltyFactors {
    fn default() -> Self {
        Self {
            consecutive: 0.5,
            day_imbalance: 0.5,
            week_imbalance: 0.5,
            proximity: 0.5,
        }
    }
}

/// Population variance: mean of squared deviations from the mean.
/// Zero for lists shorter than 2.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Penalty for exams sitting in consecutive moments on one day.
///
/// Moment ids are interpreted as integer ordinals; `n` adjacent pairs in the
/// sorted ordinals yield `n^n * p`. Entries without a moment are skipped,
/// but any present moment id that fails integer conversion voids the whole
/// day's penalty; callers rely on that exact fallback.
pub fn consecutive_moment_penalty(entries: &[IndexEntry], p: f64) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let mut ordinals = Vec::with_capacity(entries.len());
    for entry in entries {
        match &entry.moment {
            None => continue,
            Some(id) => match id.parse::<i64>() {
                Ok(ordinal) => ordinals.push(ordinal),
                Err(_) => return 0.0,
            },
        }
    }
    ordinals.sort_unstable();

    let consecutive = ordinals.windows(2).filter(|w| w[1] == w[0] + 1).count();
    if consecutive == 0 {
        0.0
    } else {
        (consecutive as f64).powi(consecutive as i32) * p
    }
}

/// Penalty for uneven daily load within one week.
pub fn day_imbalance_penalty(day_weights: &[f64], p: f64) -> f64 {
    p * population_variance(day_weights).sqrt()
}

/// Penalty for uneven load across weeks.
pub fn week_imbalance_penalty(week_totals: &[f64], p: f64) -> f64 {
    p * population_variance(week_totals).sqrt()
}

/// Penalty for heavily-weighted exams close together in one week.
///
/// Every unordered pair of entries contributes `w1 * w2 * factor`, where the
/// factor decays with the day gap: 4 same-day, 2 adjacent days, 1 two days
/// apart, 0.2 beyond. O(k^2) in weekly entries, which stay small.
pub fn proximity_penalty(entries: &[&IndexEntry], p: f64) -> f64 {
    let mut total = 0.0;
    for (i, first) in entries.iter().enumerate() {
        for second in &entries[i + 1..] {
            let days = (first.date - second.date).num_days().abs();
            let factor = match days {
                0 => 4.0,
                1 => 2.0,
                2 => 1.0,
                _ => 0.2,
            };
            total += first.weight * second.weight * factor;
        }
    }
    total * p
}
