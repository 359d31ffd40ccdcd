//! Dispatching rules and rule engine for order sequencing.
//!
//! Provides the ordering keys behind the non-preemptive policies
//! (priority, FCFS, SJF) and a rule engine that chains them.
//!
//! # Usage
//!
//! ```
//! use kitchen_schedule::dispatching::RuleEngine;
//! use kitchen_schedule::dispatching::rules;
//! use kitchen_schedule::models::{time, Order};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Priority)
//!     .with_tie_breaker(rules::Fcfs);
//!
//! let placed = time::parse_timestamp("2025-03-01 12:00:00").unwrap();
//! let orders = vec![
//!     Order::new("Asha", "Biryani", 30, placed).with_priority(2),
//!     Order::new("Ravi", "Chai", 5, placed).with_priority(1),
//! ];
//! assert_eq!(engine.sort_indices(&orders), vec![1, 0]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::RuleEngine;

use crate::models::Order;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Scores are integers
/// so equal keys compare exactly equal and the stable sort keeps input order.
/// The width fits a nanosecond-resolution instant across chrono's whole
/// date range.
pub type RuleScore = i128;

/// A dispatching rule that evaluates order priority.
///
/// # Score Convention
/// **Lower score = dispatched first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FCFS").
    fn name(&self) -> &'static str;

    /// Scores an order. Keys depend on the order alone, never on "now".
    fn evaluate(&self, order: &Order) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
