/*!
 * Memory Types
 * Errors and statistics for the block allocator
 */

use crate::core::types::Mb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Insufficient memory: requested {requested} MB ({blocks_needed} blocks), only {blocks_free} of {total_blocks} blocks free")]
    OutOfMemory {
        requested: Mb,
        blocks_needed: usize,
        blocks_free: usize,
        total_blocks: usize,
    },
}

/// Memory statistics for the display layer
///
/// `available_mb` tracks logical usage (the sum of process demands), which
/// deliberately diverges from physical block occupancy since partial-block
/// demand still consumes a whole block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryStats {
    pub total_mb: Mb,
    pub used_mb: Mb,
    pub available_mb: Mb,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
}
