//! Kitchen scheduling domain models.
//!
//! Provides the input type ([`Order`]), the policy selector ([`Policy`]),
//! and the output types ([`Schedule`], [`ScheduleEntry`], [`OrderStatus`]).
//!
//! # Domain Mappings
//!
//! | kitchen-schedule | CPU scheduling | Job shop |
//! |------------------|----------------|----------|
//! | Order | Process | Job |
//! | prep_time | Burst time | Processing time |
//! | timestamp | Arrival time | Release time |
//! | Kitchen | Single CPU | Single machine |
//! | ScheduleEntry | Gantt chart slot | Assignment |

mod order;
mod policy;
mod schedule;
pub mod time;

pub use order::Order;
pub use policy::Policy;
pub use schedule::{OrderStatus, Schedule, ScheduleEntry};
