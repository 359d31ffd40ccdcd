//! Built-in dispatching rules.
//!
//! | Rule | Key | Policy |
//! |------|-----|--------|
//! | [`Priority`] | `priority` ascending | Priority |
//! | [`Fcfs`] | `timestamp` ascending | FCFS |
//! | [`Sjf`] | `prep_time` ascending | SJF |
//!
//! # Score Convention
//! All rules return lower scores for orders that should go first.

use super::{DispatchingRule, RuleScore};
use crate::models::Order;

const NANOS_PER_SEC: RuleScore = 1_000_000_000;

/// Priority rule.
///
/// Lower `priority` values are more urgent and go first.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, order: &Order) -> RuleScore {
        RuleScore::from(order.priority)
    }

    fn description(&self) -> &'static str {
        "Order Priority"
    }
}

/// First Come, First Served.
///
/// Orders placed earlier go first. Scores are UTC epoch nanoseconds, so
/// orders compare by instant regardless of offset and sub-millisecond
/// differences still separate them.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, order: &Order) -> RuleScore {
        let ts = &order.timestamp;
        RuleScore::from(ts.timestamp()) * NANOS_PER_SEC
            + RuleScore::from(ts.timestamp_subsec_nanos())
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Shortest Job First.
///
/// Orders with shorter preparation time go first. Minimizes mean waiting
/// time on a single resource.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, order: &Order) -> RuleScore {
        RuleScore::from(order.prep_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}
