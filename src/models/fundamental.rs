//! Tally counters and derived metrics for one fundamental.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use super::{Direction, Fundamental, Mark, Outcome};
use crate::calculate;

/// Raw tally counts for one fundamental of one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawCounters {
    #[serde(default)]
    pub excellent: u32,
    #[serde(default)]
    pub good: u32,
    #[serde(default)]
    pub poor: u32,
    #[serde(default)]
    pub error: u32,
    /// Attack only: attempts stopped by the opposing block
    #[serde(default)]
    pub blocked: u32,
}

impl RawCounters {
    /// Count for one generic grade.
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Excellent => self.excellent,
            Outcome::Good => self.good,
            Outcome::Poor => self.poor,
            Outcome::Error => self.error,
        }
    }

    /// Sum of every counter, blocked included.
    pub fn sum(&self) -> u64 {
        [self.excellent, self.good, self.poor, self.error, self.blocked]
            .into_iter()
            .map(u64::from)
            .sum()
    }

    fn slot_mut(&mut self, mark: Mark) -> &mut u32 {
        match mark {
            Mark::Excellent => &mut self.excellent,
            Mark::Good => &mut self.good,
            Mark::Poor => &mut self.poor,
            Mark::Error => &mut self.error,
            Mark::Blocked => &mut self.blocked,
        }
    }
}

impl AddAssign<&RawCounters> for RawCounters {
    fn add_assign(&mut self, other: &RawCounters) {
        self.excellent = self.excellent.saturating_add(other.excellent);
        self.good = self.good.saturating_add(other.good);
        self.poor = self.poor.saturating_add(other.poor);
        self.error = self.error.saturating_add(other.error);
        self.blocked = self.blocked.saturating_add(other.blocked);
    }
}

/// Metrics derived from raw counters. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedStats {
    pub total_attempts: u32,
    pub points: u32,
    pub errors: u32,
    /// (points - errors) / attempts, in percent; may be negative
    pub efficiency: f64,
    /// (excellent + good) / attempts, in percent
    pub positivity: f64,
}

/// Counters plus derived metrics for one fundamental.
///
/// Derived fields are recomputed after every counter mutation, so a reader
/// can never observe totals that disagree with the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundamentalStat {
    kind: Fundamental,
    #[serde(flatten)]
    counters: RawCounters,
    #[serde(flatten)]
    derived: DerivedStats,
}

impl FundamentalStat {
    /// A zeroed stat for the given fundamental.
    pub fn new(kind: Fundamental) -> Self {
        Self::with_counters(kind, RawCounters::default())
    }

    /// A stat seeded with counters. A blocked count is dropped unless the
    /// fundamental tracks blocks.
    pub fn with_counters(kind: Fundamental, mut counters: RawCounters) -> Self {
        if !kind.tracks_blocked() {
            counters.blocked = 0;
        }
        let mut stat = Self {
            kind,
            counters,
            derived: DerivedStats::default(),
        };
        stat.recompute();
        stat
    }

    pub fn kind(&self) -> Fundamental {
        self.kind
    }

    pub fn counters(&self) -> &RawCounters {
        &self.counters
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    pub fn count(&self, outcome: Outcome) -> u32 {
        self.counters.get(outcome)
    }

    pub fn blocked(&self) -> u32 {
        self.counters.blocked
    }

    pub fn total_attempts(&self) -> u32 {
        self.derived.total_attempts
    }

    pub fn points(&self) -> u32 {
        self.derived.points
    }

    pub fn errors(&self) -> u32 {
        self.derived.errors
    }

    pub fn efficiency(&self) -> f64 {
        self.derived.efficiency
    }

    pub fn positivity(&self) -> f64 {
        self.derived.positivity
    }

    /// Add one attempt with the given grade.
    pub fn increment(&mut self, outcome: Outcome) {
        self.apply(outcome.into(), Direction::Increment);
    }

    /// Remove one attempt with the given grade. Clamped at zero.
    pub fn decrement(&mut self, outcome: Outcome) {
        self.apply(outcome.into(), Direction::Decrement);
    }

    /// Move the counter behind `mark` by one step.
    ///
    /// Returns `false`, leaving the stat untouched, when `mark` is
    /// [`Mark::Blocked`] and this fundamental does not track blocks.
    pub fn apply(&mut self, mark: Mark, direction: Direction) -> bool {
        if mark == Mark::Blocked && !self.kind.tracks_blocked() {
            return false;
        }

        let slot = self.counters.slot_mut(mark);
        *slot = match direction {
            Direction::Increment => slot.saturating_add(1),
            Direction::Decrement => slot.saturating_sub(1),
        };
        self.recompute();
        true
    }

    /// Recompute derived fields from the current counters. Idempotent.
    pub fn recompute(&mut self) {
        self.derived = calculate::derive(self.kind, &self.counters);
    }
}
