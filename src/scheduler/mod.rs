//! Scheduling engine and KPI evaluation.
//!
//! Turns an order snapshot, a policy and a captured "now" into a
//! [`Schedule`]. Every call is a fresh, stateless computation; the only
//! time source is the `now` the caller passes in.
//!
//! # Schedulers
//!
//! - [`SequentialScheduler`]: Priority, FCFS and SJF. One entry per order,
//!   window anchored at the order's own arrival.
//! - [`RoundRobinScheduler`]: preemptive time slicing on a single kitchen
//!   clock, one entry per slice.
//!
//! # KPI
//!
//! [`ScheduleKpi`] computes makespan, turnaround, waiting time, status
//! counts and preemptions.

mod kpi;
mod round_robin;
mod sequential;

pub use kpi::ScheduleKpi;
pub use round_robin::RoundRobinScheduler;
pub use sequential::{rule_engine_for, SequentialScheduler};

use chrono::{DateTime, FixedOffset};

use crate::config::SchedulerConfig;
use crate::dispatching::SchedulingContext;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{Order, Policy, Schedule};

/// Round-robin quantum (minutes) used when the caller does not choose one.
pub const DEFAULT_QUANTUM: i64 = 5;

/// A scheduler for any policy, validated at construction.
///
/// # Example
///
/// ```
/// use kitchen_schedule::models::{time, Order, Policy};
/// use kitchen_schedule::scheduler::KitchenScheduler;
///
/// let placed = time::parse_timestamp("2025-03-01 12:00:00").unwrap();
/// let orders = vec![
///     Order::new("Asha", "Biryani", 10, placed).with_priority(2),
///     Order::new("Ravi", "Chai", 5, placed).with_priority(1),
/// ];
///
/// let scheduler = KitchenScheduler::new(Policy::Priority, 5).unwrap();
/// let schedule = scheduler.schedule(&orders, placed).unwrap();
/// assert_eq!(schedule.entries[0].order.customer_name, "Ravi");
/// ```
#[derive(Debug, Clone)]
pub enum KitchenScheduler {
    /// Priority, FCFS or SJF.
    Sequential(SequentialScheduler),
    /// Round robin with a validated quantum.
    RoundRobin(RoundRobinScheduler),
}

impl KitchenScheduler {
    /// Builds the scheduler for `policy`.
    ///
    /// `quantum` only matters for [`Policy::RoundRobin`].
    ///
    /// # Errors
    /// [`SchedulerError::InvalidQuantum`] for round-robin with `quantum <= 0`.
    pub fn new(policy: Policy, quantum: i64) -> SchedulerResult<Self> {
        match policy {
            Policy::RoundRobin => Ok(Self::RoundRobin(RoundRobinScheduler::new(quantum)?)),
            Policy::Priority | Policy::Fcfs | Policy::Sjf => SequentialScheduler::for_policy(policy)
                .map(Self::Sequential)
                .ok_or_else(|| SchedulerError::UnknownPolicy(policy.name().to_string())),
        }
    }

    /// Builds the scheduler named by a configuration.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownPolicy`] or [`SchedulerError::InvalidQuantum`].
    pub fn from_config(config: &SchedulerConfig) -> SchedulerResult<Self> {
        let policy: Policy = config.policy.parse()?;
        Self::new(policy, config.quantum)
    }

    /// The policy this scheduler implements.
    pub fn policy(&self) -> Policy {
        match self {
            Self::Sequential(s) => s.policy(),
            Self::RoundRobin(_) => Policy::RoundRobin,
        }
    }

    /// Schedules `orders`, classifying every entry against `now`.
    ///
    /// # Errors
    /// [`SchedulerError::TimeOutOfRange`] if a window ends past the latest
    /// representable instant.
    pub fn schedule(
        &self,
        orders: &[Order],
        now: DateTime<FixedOffset>,
    ) -> SchedulerResult<Schedule> {
        let context = SchedulingContext::at(now);
        match self {
            Self::Sequential(s) => s.schedule(orders, &context),
            Self::RoundRobin(s) => s.schedule(orders, &context),
        }
    }
}

/// Computes a schedule from a policy name.
///
/// Accepted names are `Priority`, `FCFS`, `SJF` and `Round Robin`.
/// Validation happens before any work, so a failed call returns no
/// partial output.
///
/// # Errors
/// - [`SchedulerError::UnknownPolicy`] if `policy_name` is not recognized.
/// - [`SchedulerError::InvalidQuantum`] for round-robin with `quantum <= 0`.
/// - [`SchedulerError::TimeOutOfRange`] if the schedule runs past the latest
///   representable instant.
pub fn compute_schedule(
    orders: &[Order],
    policy_name: &str,
    quantum: i64,
    now: DateTime<FixedOffset>,
) -> SchedulerResult<Schedule> {
    let policy: Policy = policy_name.parse()?;
    KitchenScheduler::new(policy, quantum)?.schedule(orders, now)
}
