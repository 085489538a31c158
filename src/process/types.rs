/*!
 * Process Types
 * State machine and errors for simulated processes
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process PID={0} not found")]
    NotFound(Pid),
}

/// Process state
///
/// `Terminated` is absorbing: a terminated process never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process structure has been created but not yet admitted
    New,
    /// Process is waiting in the ready queue
    Ready,
    /// Process holds the CPU this cycle
    Running,
    /// Process has terminated (kept in the registry for audit)
    Terminated,
}

impl ProcessState {
    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self, ProcessState::Terminated)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, ProcessState::Ready)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, ProcessState::Running)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessState::New => write!(f, "new"),
            ProcessState::Ready => write!(f, "ready"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Terminated => write!(f, "terminated"),
        }
    }
}
