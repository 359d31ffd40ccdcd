//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest entry end − earliest entry start |
//! | Avg Turnaround | Mean of (completion − order placed) |
//! | Avg Waiting | Mean of (turnaround − prep_time) |
//! | Status counts | Entries per Pending / In Progress / Completed |
//! | Preemptions | Entries beyond one per order |
//!
//! Times are in minutes. Turnaround and waiting are fractional when
//! timestamps carry seconds. Under the non-preemptive policies the window
//! starts at arrival, so waiting time is always zero there.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

use chrono::TimeDelta;
use serde::Serialize;

use crate::models::{Order, OrderStatus, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleKpi {
    /// Makespan (minutes).
    pub makespan_min: i64,
    /// Mean turnaround time (minutes).
    pub avg_turnaround_min: f64,
    /// Mean waiting time (minutes).
    pub avg_waiting_min: f64,
    /// Entries not yet started.
    pub pending: usize,
    /// Entries running at the captured "now".
    pub in_progress: usize,
    /// Entries already finished.
    pub completed: usize,
    /// Number of times an order was sliced beyond its first entry.
    pub preemptions: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the orders it was built from.
    ///
    /// `orders` must be the same slice passed to the scheduler, since
    /// entries refer to orders by index.
    pub fn calculate(schedule: &Schedule, orders: &[Order]) -> Self {
        let mut total_turnaround = 0.0;
        let mut total_waiting = 0.0;
        let mut counted = 0usize;

        for (idx, order) in orders.iter().enumerate() {
            if let Some(completion) = schedule.completion_time(idx) {
                let turnaround = completion - order.timestamp;
                total_turnaround += minutes(turnaround);
                total_waiting += minutes(turnaround - order.prep_duration());
                counted += 1;
            }
        }

        let mean = |total: f64| {
            if counted == 0 {
                0.0
            } else {
                total / counted as f64
            }
        };

        Self {
            makespan_min: schedule.makespan().num_minutes(),
            avg_turnaround_min: mean(total_turnaround),
            avg_waiting_min: mean(total_waiting),
            pending: schedule.count_by_status(OrderStatus::Pending),
            in_progress: schedule.count_by_status(OrderStatus::InProgress),
            completed: schedule.count_by_status(OrderStatus::Completed),
            preemptions: schedule.len().saturating_sub(counted),
        }
    }
}

fn minutes(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 / 60.0
}
