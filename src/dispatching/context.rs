//! Scheduling context for status derivation.

use chrono::{DateTime, FixedOffset};

/// Per-call scheduling state.
///
/// Holds the single "now" captured for one scheduling call. Every entry of
/// a schedule is classified against this same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingContext {
    /// The captured wall-clock instant.
    pub now: DateTime<FixedOffset>,
}

impl SchedulingContext {
    /// Creates a context frozen at `now`.
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}
