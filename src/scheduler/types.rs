/*!
 * Scheduler Types
 * Cycle outcomes and aggregate statistics
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Result of one round-robin dispatch cycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CycleOutcome {
    /// Whether a quantum was actually dispatched (false when paused or the
    /// queue was empty; no counters change in that case)
    pub executed: bool,
    /// Human-readable trace of the steps taken, one line per step.
    /// Used only for logging, never for control flow.
    pub trace: Vec<String>,
    /// Process that completed during this cycle, if any
    pub finished: Option<Pid>,
}

impl CycleOutcome {
    /// Outcome for a cycle that did not run
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            executed: false,
            trace: vec![reason.into()],
            finished: None,
        }
    }
}

/// Scheduler statistics
///
/// Numeric values are exact; one-decimal rendering is a display concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub total_cycles: u64,
    pub completed: u64,
    /// Mean `wait_time` over the processes currently queued (0 when empty)
    pub average_wait_time: f64,
    /// Completions per cycle, as a percentage (0 before any cycle)
    pub throughput: f64,
}
