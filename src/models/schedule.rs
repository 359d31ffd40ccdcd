//! Schedule (solution) model.
//!
//! A schedule is the timed, status-annotated sequence of entries produced
//! for one snapshot of orders. Non-preemptive policies yield one entry per
//! order; round-robin yields one entry per slice.

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;
use std::fmt;

use super::time::serialize_clock;
use super::{Order, Policy};
use crate::error::{SchedulerError, SchedulerResult};

/// Live status of an entry relative to a captured "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderStatus {
    /// The window has not started yet.
    Pending,
    /// `now` lies inside `[start, end)`.
    #[serde(rename = "In Progress")]
    InProgress,
    /// The window has ended (`end` itself counts as completed).
    Completed,
}

impl OrderStatus {
    /// Classifies the half-open window `[start, end)` against `now`.
    pub fn at(
        now: DateTime<FixedOffset>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        if now < start {
            OrderStatus::Pending
        } else if now < end {
            OrderStatus::InProgress
        } else {
            OrderStatus::Completed
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One timed execution window for an order.
///
/// Serializes as the order's fields plus `start_time`, `end_time`
/// (`HH:MM:SS`), `status` and, for round-robin, `slice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// The order this window belongs to.
    #[serde(flatten)]
    pub order: Order,
    /// Position of the order in the input slice.
    #[serde(skip)]
    pub order_index: usize,
    /// Window start.
    #[serde(serialize_with = "serialize_clock")]
    pub start_time: DateTime<FixedOffset>,
    /// Window end (exclusive).
    #[serde(serialize_with = "serialize_clock")]
    pub end_time: DateTime<FixedOffset>,
    /// Status at schedule-computation time.
    pub status: OrderStatus,
    /// Minutes consumed by this slice (round-robin only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<u32>,
}

impl ScheduleEntry {
    /// Creates an entry for `order` running `minutes` from `start`.
    ///
    /// The status is derived from `now` against the entry's own window.
    ///
    /// # Errors
    /// [`SchedulerError::TimeOutOfRange`] if the window would end past
    /// chrono's latest instant.
    pub fn new(
        order: &Order,
        order_index: usize,
        start_time: DateTime<FixedOffset>,
        minutes: u32,
        now: DateTime<FixedOffset>,
    ) -> SchedulerResult<Self> {
        let end_time = start_time
            .checked_add_signed(TimeDelta::minutes(i64::from(minutes)))
            .ok_or(SchedulerError::TimeOutOfRange { order_index })?;
        Ok(Self {
            order: order.clone(),
            order_index,
            start_time,
            end_time,
            status: OrderStatus::at(now, start_time, end_time),
            slice: None,
        })
    }

    /// Marks this entry as a round-robin slice.
    pub fn with_slice(mut self, minutes: u32) -> Self {
        self.slice = Some(minutes);
        self
    }

    /// Length of the window.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Length of the window in whole minutes.
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// A complete schedule for one order snapshot.
///
/// Serializes as `{"algorithm": ..., "orders": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Policy that produced the entries.
    #[serde(rename = "algorithm")]
    pub policy: Policy,
    /// Entries in execution (policy) order.
    #[serde(rename = "orders")]
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule for a policy.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
        }
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for the order at `order_index`, in execution order.
    pub fn entries_for_order(&self, order_index: usize) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.order_index == order_index)
            .collect()
    }

    /// Total minutes scheduled for the order at `order_index`.
    pub fn total_slice_for(&self, order_index: usize) -> i64 {
        self.entries_for_order(order_index)
            .iter()
            .map(|e| e.duration_min())
            .sum()
    }

    /// Earliest start and latest end across all entries.
    pub fn span(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = self.entries.iter().map(|e| e.start_time).min()?;
        let end = self.entries.iter().map(|e| e.end_time).max()?;
        Some((start, end))
    }

    /// Duration from earliest start to latest end. Zero when empty.
    pub fn makespan(&self) -> TimeDelta {
        self.span()
            .map(|(start, end)| end - start)
            .unwrap_or_else(TimeDelta::zero)
    }

    /// Completion instant of an order (latest end of its entries).
    pub fn completion_time(&self, order_index: usize) -> Option<DateTime<FixedOffset>> {
        self.entries_for_order(order_index)
            .iter()
            .map(|e| e.end_time)
            .max()
    }

    /// Number of entries with the given status.
    pub fn count_by_status(&self, status: OrderStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
