//! Non-preemptive schedulers (Priority, FCFS, SJF).
//!
//! # Algorithm
//!
//! 1. Stable-sort orders by the policy's dispatching rule.
//! 2. Give each order the window `[timestamp, timestamp + prep_time)`.
//! 3. Classify each window against the captured "now".
//!
//! # Modeling note
//! Windows are anchored at each order's own arrival time and are
//! independent of one another, so they may overlap. They describe a
//! *logical* preparation window, not contention for the single kitchen.
//! [`RoundRobinScheduler`](super::RoundRobinScheduler) does serialize work
//! on one cursor; the two families are not directly comparable.
//!
//! # Complexity
//! O(n log n) for n orders.

use tracing::debug;

use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::error::SchedulerResult;
use crate::models::{Order, Policy, Schedule, ScheduleEntry};

/// Dispatching rule chain for a non-preemptive policy.
///
/// Returns `None` for [`Policy::RoundRobin`], which is not a sort.
pub fn rule_engine_for(policy: Policy) -> Option<RuleEngine> {
    match policy {
        Policy::Priority => Some(RuleEngine::new().with_rule(rules::Priority)),
        Policy::Fcfs => Some(RuleEngine::new().with_rule(rules::Fcfs)),
        Policy::Sjf => Some(RuleEngine::new().with_rule(rules::Sjf)),
        Policy::RoundRobin => None,
    }
}

/// Sort-then-stamp scheduler for the non-preemptive policies.
///
/// # Example
///
/// ```
/// use kitchen_schedule::dispatching::SchedulingContext;
/// use kitchen_schedule::models::{time, Order, Policy};
/// use kitchen_schedule::scheduler::SequentialScheduler;
///
/// let placed = time::parse_timestamp("2025-03-01 12:00:00").unwrap();
/// let orders = vec![
///     Order::new("Asha", "Biryani", 30, placed),
///     Order::new("Ravi", "Chai", 5, placed),
/// ];
/// let scheduler = SequentialScheduler::for_policy(Policy::Sjf).unwrap();
/// let schedule = scheduler.schedule(&orders, &SchedulingContext::at(placed)).unwrap();
/// assert_eq!(schedule.entries[0].order.dish_name, "Chai");
/// ```
#[derive(Debug, Clone)]
pub struct SequentialScheduler {
    policy: Policy,
    engine: RuleEngine,
}

impl SequentialScheduler {
    /// Creates the scheduler for a non-preemptive policy.
    ///
    /// Returns `None` for [`Policy::RoundRobin`].
    pub fn for_policy(policy: Policy) -> Option<Self> {
        rule_engine_for(policy).map(|engine| Self { policy, engine })
    }

    /// The policy this scheduler implements.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Produces one entry per order, in policy order.
    ///
    /// # Errors
    /// [`SchedulerError::TimeOutOfRange`](crate::SchedulerError::TimeOutOfRange)
    /// if an order's window ends past the latest representable instant.
    pub fn schedule(
        &self,
        orders: &[Order],
        context: &SchedulingContext,
    ) -> SchedulerResult<Schedule> {
        let mut schedule = Schedule::new(self.policy);

        for idx in self.engine.sort_indices(orders) {
            let order = &orders[idx];
            schedule.add_entry(ScheduleEntry::new(
                order,
                idx,
                order.timestamp,
                order.prep_time,
                context.now,
            )?);
        }

        debug!(
            policy = %self.policy,
            orders = orders.len(),
            entries = schedule.len(),
            "computed non-preemptive schedule"
        );
        Ok(schedule)
    }
}
