//! Scheduler configuration.
//!
//! Loaded from a TOML file; every key is optional:
//!
//! ```toml
//! policy = "Round Robin"
//! quantum = 5
//! orders_path = "data.csv"
//! skip_malformed = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::scheduler::DEFAULT_QUANTUM;

/// Defaults for the scheduling engine and the file-backed order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Policy name (`Priority`, `FCFS`, `SJF` or `Round Robin`).
    ///
    /// Kept as text so an unknown name surfaces as
    /// [`SchedulerError::UnknownPolicy`] when the scheduler is built.
    pub policy: String,
    /// Round-robin quantum in minutes.
    pub quantum: i64,
    /// Path of the order file.
    pub orders_path: PathBuf,
    /// Skip malformed rows instead of failing the load.
    pub skip_malformed: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: "Priority".to_string(),
            quantum: DEFAULT_QUANTUM,
            orders_path: PathBuf::from("data.csv"),
            skip_malformed: false,
        }
    }
}

impl SchedulerConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> SchedulerResult<Self> {
        toml::from_str(s).map_err(|e| SchedulerError::Config(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> SchedulerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchedulerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Sets the policy name.
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policy = policy.into();
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the order file path.
    pub fn with_orders_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.orders_path = path.into();
        self
    }
}
