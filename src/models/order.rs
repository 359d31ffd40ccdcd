//! Order model.
//!
//! An order is one unit of kitchen work: a dish for a customer, with an
//! estimated preparation time and the instant it was placed.

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

/// A kitchen order awaiting scheduling.
///
/// Orders are immutable inputs; the engine never modifies them and builds
/// fresh [`ScheduleEntry`](super::ScheduleEntry) values instead.
///
/// # Time Representation
/// `prep_time` is in whole minutes. `timestamp` is an absolute instant in
/// the canonical timezone (see [`time`](super::time)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Who the order is for.
    pub customer_name: String,
    /// What is being prepared.
    pub dish_name: String,
    /// Estimated preparation time (minutes, > 0).
    pub prep_time: u32,
    /// Free-form classification. Not used by scheduling.
    pub category: String,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// When the order was placed.
    pub timestamp: DateTime<FixedOffset>,
}

impl Order {
    /// Creates an order with an empty category and priority 0.
    pub fn new(
        customer_name: impl Into<String>,
        dish_name: impl Into<String>,
        prep_time: u32,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            dish_name: dish_name.into(),
            prep_time,
            category: String::new(),
            priority: 0,
            timestamp,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Preparation time as a duration.
    #[inline]
    pub fn prep_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.prep_time))
    }
}
