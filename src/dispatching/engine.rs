//! Rule engine for multi-key dispatching.
//!
//! Chains dispatching rules lexicographically: a later rule is consulted
//! only when every earlier rule ties. Full ties keep input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore};
use crate::models::Order;

/// A composable rule engine for order sequencing.
///
/// # Example
/// ```
/// use kitchen_schedule::dispatching::RuleEngine;
/// use kitchen_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Sjf)
///     .with_tie_breaker(rules::Priority);
/// assert_eq!(engine.rule_names(), vec!["SJF", "PRIORITY"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine. With no rules, input order is kept.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when all previous rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts orders by rule evaluation (first = dispatched first).
    ///
    /// Returns indices into `orders`. The sort is stable.
    pub fn sort_indices(&self, orders: &[Order]) -> Vec<usize> {
        if orders.is_empty() {
            return Vec::new();
        }

        // Precompute scores: one row per order, one column per rule.
        let scores: Vec<Vec<RuleScore>> = orders
            .iter()
            .map(|o| self.evaluate(o))
            .collect();

        let mut indices: Vec<usize> = (0..orders.len()).collect();
        indices.sort_by(|&a, &b| compare_scores(&scores[a], &scores[b]));
        indices
    }

    /// Evaluates a single order and returns the score from each rule.
    pub fn evaluate(&self, order: &Order) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(order))
            .collect()
    }
}

fn compare_scores(a: &[RuleScore], b: &[RuleScore]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::time::parse_timestamp;

    fn make_order(name: &str, prep: u32, priority: i32, placed: &str) -> Order {
        Order::new(name, "Thali", prep, parse_timestamp(placed).unwrap()).with_priority(priority)
    }

    fn names(orders: &[Order], indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| orders[i].customer_name.clone())
            .collect()
    }

    #[test]
    fn test_sjf_ordering() {
        let orders = vec![
            make_order("long", 30, 0, "2025-03-01 11:00:00"),
            make_order("short", 5, 0, "2025-03-01 11:00:00"),
            make_order("medium", 15, 0, "2025-03-01 11:00:00"),
        ];
        let engine = RuleEngine::new().with_rule(rules::Sjf);
        let indices = engine.sort_indices(&orders);
        assert_eq!(names(&orders, &indices), ["short", "medium", "long"]);
    }

    #[test]
    fn test_fcfs_ordering() {
        let orders = vec![
            make_order("late", 5, 0, "2025-03-01 11:30:00"),
            make_order("early", 5, 0, "2025-03-01 11:00:00"),
            make_order("middle", 5, 0, "2025-03-01 11:15:00"),
        ];
        let engine = RuleEngine::new().with_rule(rules::Fcfs);
        let indices = engine.sort_indices(&orders);
        assert_eq!(names(&orders, &indices), ["early", "middle", "late"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let orders = vec![
            make_order("A", 10, 1, "2025-03-01 11:00:00"),
            make_order("B", 10, 1, "2025-03-01 10:00:00"),
            make_order("C", 10, 0, "2025-03-01 12:00:00"),
            make_order("D", 10, 1, "2025-03-01 09:00:00"),
        ];
        let engine = RuleEngine::new().with_rule(rules::Priority);
        let indices = engine.sort_indices(&orders);
        assert_eq!(names(&orders, &indices), ["C", "A", "B", "D"]);
    }

    #[test]
    fn test_tie_breaker() {
        let orders = vec![
            make_order("A", 10, 1, "2025-03-01 11:00:00"),
            make_order("B", 10, 1, "2025-03-01 10:00:00"),
        ];
        let engine = RuleEngine::new()
            .with_rule(rules::Priority)
            .with_tie_breaker(rules::Fcfs);
        let indices = engine.sort_indices(&orders);
        assert_eq!(names(&orders, &indices), ["B", "A"]);
    }

    #[test]
    fn test_no_rules_keeps_input_order() {
        let orders = vec![
            make_order("A", 30, 3, "2025-03-01 11:00:00"),
            make_order("B", 5, 1, "2025-03-01 10:00:00"),
        ];
        let indices = RuleEngine::new().sort_indices(&orders);
        assert_eq!(indices, [0, 1]);
    }

    #[test]
    fn test_empty_orders() {
        let engine = RuleEngine::new().with_rule(rules::Sjf);
        assert!(engine.sort_indices(&[]).is_empty());
    }

    #[test]
    fn test_fcfs_sub_millisecond_arrivals() {
        let base = parse_timestamp("2025-03-01 11:00:00").unwrap();
        let mut later = make_order("later", 5, 0, "2025-03-01 11:00:00");
        later.timestamp = base + chrono::TimeDelta::microseconds(500);
        let earlier = make_order("earlier", 5, 0, "2025-03-01 11:00:00");
        let orders = vec![later, earlier];

        let engine = RuleEngine::new().with_rule(rules::Fcfs);
        let indices = engine.sort_indices(&orders);
        assert_eq!(names(&orders, &indices), ["earlier", "later"]);
    }

    #[test]
    fn test_evaluate_scores() {
        let order = make_order("A", 12, 3, "2025-03-01 11:00:00");
        let engine = RuleEngine::new()
            .with_rule(rules::Sjf)
            .with_rule(rules::Priority);
        assert_eq!(engine.evaluate(&order), vec![12, 3]);
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::new().with_rule(rules::Fcfs);
        assert_eq!(format!("{engine:?}"), "RuleEngine { rules: [\"FCFS\"] }");
    }
}
