/*!
 * Core Module
 * Shared types and error aggregation
 */

pub mod errors;
pub mod types;

pub use errors::{KernelError, KernelResult};
pub use types::{Mb, Pid};
