//! Scheduling policy selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedulerError;

/// The algorithm used to order and time the kitchen's work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Ascending `priority` (lower value first).
    #[default]
    #[serde(rename = "Priority")]
    Priority,
    /// First come, first served: ascending `timestamp`.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest job first: ascending `prep_time`.
    #[serde(rename = "SJF")]
    Sjf,
    /// Preemptive time slicing with a fixed quantum.
    #[serde(rename = "Round Robin")]
    RoundRobin,
}

impl Policy {
    /// All policies, in display order.
    pub const ALL: [Policy; 4] = [
        Policy::Priority,
        Policy::Fcfs,
        Policy::Sjf,
        Policy::RoundRobin,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Policy::Priority => "Priority",
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::RoundRobin => "Round Robin",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    /// Names are matched exactly; no fallback policy is substituted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SchedulerError::UnknownPolicy(s.to_string()))
    }
}
