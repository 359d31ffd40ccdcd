//! Preemptive round-robin scheduler.
//!
//! # Algorithm
//!
//! 1. Stable-sort orders by arrival (`timestamp`).
//! 2. Start a single kitchen clock at the earliest arrival.
//! 3. Rotate through unfinished orders in arrival order; each turn runs
//!    `min(quantum, remaining)` minutes from the clock, emits one entry,
//!    and advances the clock to the entry's end.
//! 4. An order leaves the rotation when its remaining work reaches zero.
//!
//! The clock never jumps to a later arrival: every order is treated as
//! ready from the earliest timestamp onwards.
//!
//! # Complexity
//! O(n log n + Σ⌈prep_time / quantum⌉) for n orders.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::collections::VecDeque;

use tracing::debug;

use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{Order, Policy, Schedule, ScheduleEntry};

/// An order still in the rotation.
#[derive(Debug, Clone, Copy)]
struct Turn {
    order_index: usize,
    remaining: u32,
}

/// Time-sliced scheduler with a fixed quantum (minutes).
///
/// # Example
///
/// ```
/// use kitchen_schedule::dispatching::SchedulingContext;
/// use kitchen_schedule::models::{time, Order};
/// use kitchen_schedule::scheduler::RoundRobinScheduler;
///
/// let placed = time::parse_timestamp("2025-03-01 12:00:00").unwrap();
/// let orders = vec![Order::new("Asha", "Biryani", 12, placed)];
///
/// let scheduler = RoundRobinScheduler::new(5).unwrap();
/// let schedule = scheduler.schedule(&orders, &SchedulingContext::at(placed)).unwrap();
/// let slices: Vec<_> = schedule.entries.iter().map(|e| e.slice.unwrap()).collect();
/// assert_eq!(slices, vec![5, 5, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    quantum: u32,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given quantum in minutes.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidQuantum`] if `quantum <= 0` (or too large
    /// to represent).
    pub fn new(quantum: i64) -> SchedulerResult<Self> {
        if quantum <= 0 {
            return Err(SchedulerError::InvalidQuantum(quantum));
        }
        let quantum = u32::try_from(quantum).map_err(|_| SchedulerError::InvalidQuantum(quantum))?;
        Ok(Self { quantum })
    }

    /// The quantum in minutes.
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Simulates time-sliced execution, one entry per slice.
    ///
    /// # Errors
    /// [`SchedulerError::TimeOutOfRange`] if the shared clock runs past the
    /// latest representable instant.
    pub fn schedule(
        &self,
        orders: &[Order],
        context: &SchedulingContext,
    ) -> SchedulerResult<Schedule> {
        let mut schedule = Schedule::new(Policy::RoundRobin);

        let arrival_order = RuleEngine::new().with_rule(rules::Fcfs).sort_indices(orders);

        let Some(&first) = arrival_order.first() else {
            return Ok(schedule);
        };
        let mut clock = orders[first].timestamp;

        let mut ready: VecDeque<Turn> = arrival_order
            .into_iter()
            .map(|order_index| Turn {
                order_index,
                remaining: orders[order_index].prep_time,
            })
            // Nothing to cook: finished without an entry.
            .filter(|turn| turn.remaining > 0)
            .collect();

        while let Some(mut turn) = ready.pop_front() {
            let order = &orders[turn.order_index];
            let slice = self.quantum.min(turn.remaining);

            let entry = ScheduleEntry::new(order, turn.order_index, clock, slice, context.now)?
                .with_slice(slice);
            clock = entry.end_time;
            schedule.add_entry(entry);

            turn.remaining -= slice;
            if turn.remaining > 0 {
                ready.push_back(turn);
            }
        }

        debug!(
            quantum = self.quantum,
            orders = orders.len(),
            slices = schedule.len(),
            "computed round-robin schedule"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_timestamp;
    use crate::models::OrderStatus;
    use chrono::{DateTime, FixedOffset, TimeDelta};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        parse_timestamp(s).unwrap()
    }

    fn make_order(name: &str, prep: u32, placed: &str) -> Order {
        Order::new(name, "Pav Bhaji", prep, ts(placed))
    }

    fn run(quantum: i64, orders: &[Order], now: &str) -> Schedule {
        RoundRobinScheduler::new(quantum)
            .unwrap()
            .schedule(orders, &SchedulingContext::at(ts(now)))
            .unwrap()
    }

    fn slices(s: &Schedule) -> Vec<(&str, u32)> {
        s.entries
            .iter()
            .map(|e| (e.order.customer_name.as_str(), e.slice.unwrap()))
            .collect()
    }

    #[test]
    fn test_rejects_non_positive_quantum() {
        for q in [0, -1, -5] {
            match RoundRobinScheduler::new(q) {
                Err(SchedulerError::InvalidQuantum(v)) => assert_eq!(v, q),
                other => panic!("expected InvalidQuantum, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_oversized_quantum() {
        assert!(matches!(
            RoundRobinScheduler::new(i64::from(u32::MAX) + 1),
            Err(SchedulerError::InvalidQuantum(_))
        ));
    }

    #[test]
    fn test_single_order_split_into_slices() {
        let orders = vec![make_order("a", 12, "2025-03-01 12:00:00")];
        let s = run(5, &orders, "2025-03-01 11:00:00");

        assert_eq!(slices(&s), [("a", 5), ("a", 5), ("a", 2)]);
        assert_eq!(s.entries[0].start_time, ts("2025-03-01 12:00:00"));
        assert_eq!(s.entries[2].end_time, ts("2025-03-01 12:12:00"));
        assert!(s.entries.iter().all(|e| e.status == OrderStatus::Pending));
    }

    #[test]
    fn test_interleaving_and_finishing_order() {
        let orders = vec![
            make_order("b", 3, "2025-03-01 12:01:00"),
            make_order("a", 12, "2025-03-01 12:00:00"),
            make_order("c", 7, "2025-03-01 12:02:00"),
        ];
        let s = run(5, &orders, "2025-03-01 12:00:00");

        assert_eq!(
            slices(&s),
            [
                ("a", 5),
                ("b", 3),
                ("c", 5),
                ("a", 5),
                ("c", 2),
                ("a", 2),
            ]
        );

        // Entries tile the clock with no gaps or overlaps.
        for pair in s.entries.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        assert_eq!(s.makespan(), TimeDelta::minutes(22));
        assert_eq!(s.completion_time(0), Some(ts("2025-03-01 12:08:00")));
    }

    #[test]
    fn test_slices_sum_to_prep_time() {
        let orders = vec![
            make_order("a", 17, "2025-03-01 12:00:00"),
            make_order("b", 1, "2025-03-01 12:00:00"),
            make_order("c", 4, "2025-03-01 12:03:00"),
            make_order("d", 9, "2025-03-01 11:58:00"),
        ];
        for quantum in [1, 3, 4, 5, 20] {
            let s = run(quantum, &orders, "2025-03-01 12:00:00");
            assert!(s.len() >= orders.len());
            for (idx, order) in orders.iter().enumerate() {
                let entries = s.entries_for_order(idx);
                let total: u32 = entries.iter().map(|e| e.slice.unwrap()).sum();
                assert_eq!(total, order.prep_time);
                assert!(entries.iter().all(|e| e.slice.unwrap() <= quantum as u32));
                for pair in entries.windows(2) {
                    assert!(pair[0].start_time <= pair[1].start_time);
                }
            }
        }
    }

    #[test]
    fn test_quantum_larger_than_work_is_fcfs_chain() {
        let orders = vec![
            make_order("a", 4, "2025-03-01 12:00:00"),
            make_order("b", 6, "2025-03-01 12:01:00"),
        ];
        let s = run(10, &orders, "2025-03-01 12:00:00");
        assert_eq!(slices(&s), [("a", 4), ("b", 6)]);
        assert_eq!(s.entries[1].start_time, ts("2025-03-01 12:04:00"));
    }

    #[test]
    fn test_statuses_against_clock() {
        let orders = vec![make_order("a", 12, "2025-03-01 12:00:00")];
        let s = run(5, &orders, "2025-03-01 12:05:00");
        let statuses: Vec<_> = s.entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            [
                OrderStatus::Completed,
                OrderStatus::InProgress,
                OrderStatus::Pending
            ]
        );
    }

    #[test]
    fn test_zero_work_order_emits_nothing() {
        let orders = vec![
            make_order("empty", 0, "2025-03-01 12:00:00"),
            make_order("a", 3, "2025-03-01 12:01:00"),
        ];
        let s = run(5, &orders, "2025-03-01 12:00:00");
        assert_eq!(slices(&s), [("a", 3)]);
        // Clock still starts at the earliest arrival.
        assert_eq!(s.entries[0].start_time, ts("2025-03-01 12:00:00"));
    }

    #[test]
    fn test_arrival_order_keeps_sub_millisecond_differences() {
        let earlier = make_order("earlier", 2, "2025-03-01 12:00:00");
        let mut later = make_order("later", 2, "2025-03-01 12:00:00");
        later.timestamp = earlier.timestamp + TimeDelta::microseconds(500);

        let s = run(5, &[later, earlier], "2025-03-01 12:00:00");
        assert_eq!(slices(&s), [("earlier", 2), ("later", 2)]);
    }

    #[test]
    fn test_clock_overflow_is_an_error() {
        let placed = ts("2025-03-01 12:00:00");
        let orders: Vec<Order> = (0..40)
            .map(|i| Order::new(format!("c{i}"), "Feast", u32::MAX, placed))
            .collect();
        let result = RoundRobinScheduler::new(i64::from(u32::MAX))
            .unwrap()
            .schedule(&orders, &SchedulingContext::at(placed));
        assert!(matches!(result, Err(SchedulerError::TimeOutOfRange { .. })));
    }

    #[test]
    fn test_empty_input() {
        let s = run(5, &[], "2025-03-01 12:00:00");
        assert!(s.is_empty());
        assert_eq!(s.policy, Policy::RoundRobin);
    }

    #[test]
    fn test_deterministic_for_frozen_now() {
        let orders = vec![
            make_order("a", 8, "2025-03-01 12:00:00"),
            make_order("b", 6, "2025-03-01 12:00:00"),
        ];
        let first = run(3, &orders, "2025-03-01 12:04:00");
        let second = run(3, &orders, "2025-03-01 12:04:00");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
