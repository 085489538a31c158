/*!
 * OS Simulation Kernel Library
 * Teaching simulation of core operating system control logic:
 * process lifecycle, round-robin CPU scheduling, and fixed-block
 * memory allocation with compaction.
 */

pub mod core;
pub mod kernel;
pub mod memory;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{KernelError, KernelResult};
pub use kernel::{ActivityLog, Command, CommandError, Kernel, LogEntry, LogLevel};
pub use memory::{BlockAllocator, MemoryError, MemoryResult, MemoryStats};
pub use process::{Process, ProcessHandle, ProcessState};
pub use scheduler::{CycleOutcome, Scheduler, SchedulerStats};
