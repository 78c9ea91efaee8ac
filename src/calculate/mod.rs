//! Statistics calculation engine.
//!
//! Turns raw tally counters into derived metrics:
//! - Per-fundamental totals, points and errors
//! - Efficiency and positivity percentages
//! - Display rounding

use crate::models::{DerivedStats, Fundamental, Outcome, RawCounters};

/// Percentage of `part` over `total`, or 0 when there are no attempts.
pub fn percentage(part: i64, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 * 100.0) / total as f64
    }
}

/// Net scoring value: (points - errors) / attempts, as a percentage.
/// Negative when a subject gives away more than it wins.
pub fn efficiency(points: u32, errors: u32, total_attempts: u32) -> f64 {
    percentage(points as i64 - errors as i64, total_attempts)
}

/// Share of attempts graded excellent or good, as a percentage.
pub fn positivity(positive: u32, total_attempts: u32) -> f64 {
    percentage(positive as i64, total_attempts)
}

/// Sum of the counts for the grades matching `filter`. Saturates at
/// `u32::MAX`.
fn graded_sum(raw: &RawCounters, filter: impl Fn(Outcome) -> bool) -> u32 {
    Outcome::ALL
        .into_iter()
        .filter(|&o| filter(o))
        .fold(0u32, |sum, o| sum.saturating_add(raw.get(o)))
}

/// Round a percentage to the nearest integer for display.
/// Halves round away from zero.
pub fn round_percentage(value: f64) -> i32 {
    value.round() as i32
}

/// Derive the statistics of one fundamental from its raw counters.
///
/// | fundamental | attempts                  | points    | errors        |
/// |-------------|---------------------------|-----------|---------------|
/// | service     | # + - =                   | # (ace)   | =             |
/// | reception   | # + - =                   | 0         | =             |
/// | attack      | # + - = M                 | # (kill)  | = + M         |
/// | defense     | # + - =                   | #         | =             |
pub fn derive(fundamental: Fundamental, raw: &RawCounters) -> DerivedStats {
    let graded = graded_sum(raw, |_| true);
    let positive = graded_sum(raw, |o| o.is_positive());

    let (total_attempts, points, errors) = match fundamental {
        Fundamental::Service => (graded, raw.excellent, raw.error),
        Fundamental::Reception => (graded, 0, raw.error),
        Fundamental::Attack => (
            graded.saturating_add(raw.blocked),
            raw.excellent,
            raw.error.saturating_add(raw.blocked),
        ),
        Fundamental::Defense => (graded, raw.excellent, raw.error),
    };

    DerivedStats {
        total_attempts,
        points,
        errors,
        efficiency: efficiency(points, errors, total_attempts),
        positivity: positivity(positive, total_attempts),
    }
}
