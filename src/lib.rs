//! Kitchen order scheduling.
//!
//! Schedules pending kitchen orders onto a single shared kitchen with one
//! of four policies and reports each order's projected window and live
//! status relative to a caller-supplied "now".
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Order`, `Policy`, `Schedule`,
//!   `ScheduleEntry`, `OrderStatus`, plus canonical-timezone helpers
//! - **`dispatching`**: Ordering rules (Priority, FCFS, SJF) and the rule engine
//! - **`scheduler`**: Non-preemptive and round-robin schedulers, the
//!   `compute_schedule` entry point, and schedule KPIs
//! - **`store`**: Order stores (CSV file, in-memory)
//! - **`validation`**: Order invariant checks
//! - **`config`**: TOML configuration
//!
//! # Example
//!
//! ```
//! use kitchen_schedule::models::time;
//! use kitchen_schedule::models::Order;
//! use kitchen_schedule::scheduler::compute_schedule;
//!
//! let placed = time::parse_timestamp("2025-03-01 12:00:00").unwrap();
//! let orders = vec![Order::new("Asha", "Thali", 12, placed)];
//!
//! let schedule = compute_schedule(&orders, "Round Robin", 5, placed).unwrap();
//! assert_eq!(schedule.len(), 3);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{SchedulerError, SchedulerResult};
