//! Error types for scheduling and order storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the scheduling engine and the order stores.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A stored record could not be turned into a valid [`Order`](crate::models::Order).
    #[error("malformed order record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An order offered for storage violates the order invariants.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The requested policy name is not one of the recognized policies.
    #[error("unknown scheduling policy: {0:?}")]
    UnknownPolicy(String),

    /// Round-robin was requested with a non-positive quantum.
    #[error("invalid round-robin quantum: {0} (must be a positive number of minutes)")]
    InvalidQuantum(i64),

    /// A schedule window would end past the latest representable instant.
    #[error("schedule for order #{order_index} runs past the representable time range")]
    TimeOutOfRange { order_index: usize },

    /// The backing order store could not be read or written.
    #[error("order store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SchedulerError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn store(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
