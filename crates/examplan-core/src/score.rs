//! Raw-cost normalization into 0..100 desirability scores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spread below which all raw costs are considered equal.
const EQUALITY_EPSILON: f64 = 1e-9;

/// A candidate date with its final desirability score (0 worst, 100 best).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub date: NaiveDate,
    pub score: f64,
}

/// Convert raw costs into scores via min-max inversion.
///
/// Lower cost maps linearly to a higher score, rounded to 2 decimals. When
/// every cost is equal (spread below 1e-9) all candidates score exactly 50.0.
pub fn normalize(results: Vec<(NaiveDate, f64)>) -> Vec<ScoredCandidate> {
    if results.is_empty() {
        return Vec::new();
    }

    let min = results.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min);
    let max = results
        .iter()
        .map(|(_, c)| *c)
        .fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < EQUALITY_EPSILON {
        return results
            .into_iter()
            .map(|(date, _)| ScoredCandidate { date, score: 50.0 })
            .collect();
    }

    results
        .into_iter()
        .map(|(date, cost)| {
            let score = 100.0 * (1.0 - (cost - min) / (max - min));
            ScoredCandidate {
                date,
                score: round2(score),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
