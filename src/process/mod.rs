/*!
 * Process
 * Task record with identity, memory demand, and remaining execution cost
 */

pub mod types;

pub use types::{ProcessError, ProcessResult, ProcessState};

use crate::core::types::{Mb, Pid};
use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::Arc;
use time::OffsetDateTime;

/// Default CPU cost drawn when none is requested, in scheduler cycles
const DEFAULT_CPU_COST: RangeInclusive<u32> = 3..=8;

/// Shared process record, referenced by both the kernel registry and the
/// scheduler's ready queue. The simulation is single-threaded; the lock only
/// arbitrates the two owners, never concurrent callers.
pub type ProcessHandle = Arc<RwLock<Process>>;

/// Simulated process
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    /// Memory demand in MB, fixed for the process lifetime
    pub memory_mb: Mb,
    pub total_cpu: u32,
    /// Remaining execution cost; reaching 0 terminates the process
    pub remaining_cpu: u32,
    /// Cycles spent sitting in the ready queue (never incremented while running)
    pub wait_time: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Process {
    /// Create a process record. `cpu_cost` defaults to a uniform draw from
    /// 3..=8 cycles when unspecified.
    #[must_use]
    pub fn new(pid: Pid, name: impl Into<String>, memory_mb: Mb, cpu_cost: Option<u32>) -> Self {
        let total_cpu =
            cpu_cost.unwrap_or_else(|| rand::thread_rng().gen_range(DEFAULT_CPU_COST));
        Self {
            pid,
            name: name.into(),
            state: ProcessState::New,
            memory_mb,
            total_cpu,
            remaining_cpu: total_cpu,
            wait_time: 0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Wrap into the shared handle used by the registry and the ready queue
    #[inline]
    #[must_use]
    pub fn into_handle(self) -> ProcessHandle {
        Arc::new(RwLock::new(self))
    }

    /// Consume one quantum of CPU.
    ///
    /// Returns `true` when the process has finished and entered the
    /// `Terminated` state. Callers must not advance a terminated process;
    /// the scheduler guarantees it never re-dispatches one.
    pub fn advance(&mut self) -> bool {
        self.state = ProcessState::Running;
        self.remaining_cpu = self.remaining_cpu.saturating_sub(1);

        if self.remaining_cpu == 0 {
            self.state = ProcessState::Terminated;
            true
        } else {
            self.state = ProcessState::Ready;
            false
        }
    }
}
