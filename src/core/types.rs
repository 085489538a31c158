/*!
 * Core Types
 * Common types used across the simulation
 */

/// Process ID type
pub type Pid = u32;

/// Memory size in megabytes
pub type Mb = u64;
