/*!
 * Memory Management
 * Fixed-block allocator with logical-usage accounting and compaction
 */

mod manager;
pub mod types;

pub use manager::{Allocation, BlockAllocator, BLOCK_COUNT, DEFAULT_CAPACITY_MB};
pub use types::{MemoryError, MemoryResult, MemoryStats};
