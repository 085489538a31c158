/*!
 * Kernel Errors
 * Aggregates subsystem errors behind a single crate-level type
 */

use crate::kernel::CommandError;
use crate::memory::MemoryError;
use crate::process::ProcessError;
use thiserror::Error;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

/// Top-level error for kernel operations
///
/// Every failure is recoverable and reported through the activity log;
/// none aborts the simulation.
#[derive(Error, Debug, Clone)]
pub enum KernelError {
    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Command(#[from] CommandError),
}
