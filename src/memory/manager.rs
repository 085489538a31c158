/*!
 * Block Allocator
 * Fixed-block memory assignment with first-fit scanning and compaction
 */

use super::types::{MemoryError, MemoryResult, MemoryStats};
use crate::core::types::{Mb, Pid};
use log::info;
use std::collections::BTreeMap;

/// Number of fixed memory blocks
pub const BLOCK_COUNT: usize = 10;

/// Default total capacity in MB
pub const DEFAULT_CAPACITY_MB: Mb = 200;

/// Blocks owned by one process, plus the logical demand debited for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Block indices owned, ascending
    pub blocks: Vec<usize>,
    /// Requested MB; restored to `available` on free
    pub demand_mb: Mb,
}

/// Fixed-block memory allocator
///
/// Divides `total_mb` into [`BLOCK_COUNT`] equal blocks. A process's demand
/// is rounded up to whole blocks for occupancy, but `available_mb` is debited
/// by the exact demand, so logical availability can exceed what is physically
/// placeable. This asymmetry is deliberate and kept as-is.
#[derive(Debug, Clone)]
pub struct BlockAllocator {
    total_mb: Mb,
    available_mb: Mb,
    block_size: Mb,
    /// Occupancy flags, index-addressable; `true` = occupied
    blocks: Vec<bool>,
    /// Keyed by pid; BTreeMap gives compaction a deterministic
    /// ascending-pid iteration order
    allocations: BTreeMap<Pid, Allocation>,
}

impl BlockAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_MB)
    }

    /// Create an allocator with custom capacity (useful for testing).
    /// Capacities below [`BLOCK_COUNT`] MB clamp the block size to 1 MB.
    #[must_use]
    pub fn with_capacity(total_mb: Mb) -> Self {
        let block_size = (total_mb / BLOCK_COUNT as Mb).max(1);
        info!(
            "Block allocator initialized: {} MB in {} blocks of {} MB",
            total_mb, BLOCK_COUNT, block_size
        );
        Self {
            total_mb,
            available_mb: total_mb,
            block_size,
            blocks: vec![false; BLOCK_COUNT],
            allocations: BTreeMap::new(),
        }
    }

    /// Assign blocks to a process.
    ///
    /// Scans blocks in ascending index order (first-fit, not necessarily
    /// contiguous). Fails atomically: on [`MemoryError::OutOfMemory`] no
    /// state changes.
    pub fn allocate(&mut self, pid: Pid, demand_mb: Mb) -> MemoryResult<()> {
        let blocks_needed = demand_mb.div_ceil(self.block_size) as usize;
        let free = self.find_free_blocks(blocks_needed);

        if free.len() < blocks_needed {
            return Err(MemoryError::OutOfMemory {
                requested: demand_mb,
                blocks_needed,
                blocks_free: free.len(),
                total_blocks: BLOCK_COUNT,
            });
        }

        for &index in &free {
            self.blocks[index] = true;
        }
        self.available_mb -= demand_mb;
        self.allocations.insert(
            pid,
            Allocation {
                blocks: free,
                demand_mb,
            },
        );

        info!(
            "Allocated {} blocks to PID={} ({} MB demanded, {} MB available)",
            blocks_needed, pid, demand_mb, self.available_mb
        );
        Ok(())
    }

    /// Release the blocks owned by a process. Idempotent: freeing a pid with
    /// no active allocation is a no-op.
    pub fn free(&mut self, pid: Pid) {
        if let Some(allocation) = self.allocations.remove(&pid) {
            for index in &allocation.blocks {
                self.blocks[*index] = false;
            }
            self.available_mb += allocation.demand_mb;
            info!(
                "Freed {} blocks of PID={} ({} MB available)",
                allocation.blocks.len(),
                pid,
                self.available_mb
            );
        }
    }

    /// Collect up to `count` free block indices, ascending first-fit.
    /// Returns fewer than `count` when the scan exhausts; callers must check.
    #[must_use]
    pub fn find_free_blocks(&self, count: usize) -> Vec<usize> {
        let mut free = Vec::with_capacity(count);
        for (index, occupied) in self.blocks.iter().enumerate() {
            if free.len() == count {
                break;
            }
            if !occupied {
                free.push(index);
            }
        }
        free
    }

    /// Eliminate fragmentation by re-laying out every allocation contiguously
    /// from index 0, iterating allocations in ascending pid order. Rebuilds
    /// occupancy and the allocation map; never touches `available_mb` or any
    /// demand. Idempotent.
    pub fn compact(&mut self) {
        self.blocks.fill(false);

        let mut next_block = 0;
        for allocation in self.allocations.values_mut() {
            let owned = allocation.blocks.len();
            allocation.blocks.clear();
            for _ in 0..owned {
                self.blocks[next_block] = true;
                allocation.blocks.push(next_block);
                next_block += 1;
            }
        }

        info!("Memory compacted: {} blocks in use", next_block);
    }

    /// Whether a process currently holds an allocation
    #[inline]
    #[must_use]
    pub fn owns(&self, pid: Pid) -> bool {
        self.allocations.contains_key(&pid)
    }

    /// Blocks owned by a process, if any
    #[must_use]
    pub fn allocation(&self, pid: Pid) -> Option<&Allocation> {
        self.allocations.get(&pid)
    }

    /// Occupancy flags for the display layer
    #[inline]
    #[must_use]
    pub fn blocks(&self) -> &[bool] {
        &self.blocks
    }

    #[inline]
    #[must_use]
    pub fn total_mb(&self) -> Mb {
        self.total_mb
    }

    #[inline]
    #[must_use]
    pub fn available_mb(&self) -> Mb {
        self.available_mb
    }

    #[inline]
    #[must_use]
    pub fn block_size(&self) -> Mb {
        self.block_size
    }

    pub fn stats(&self) -> MemoryStats {
        let used_mb = self.total_mb - self.available_mb;
        let allocated_blocks = self.blocks.iter().filter(|occupied| **occupied).count();
        MemoryStats {
            total_mb: self.total_mb,
            used_mb,
            available_mb: self.available_mb,
            usage_percentage: if self.total_mb == 0 {
                0.0
            } else {
                used_mb as f64 / self.total_mb as f64 * 100.0
            },
            allocated_blocks,
            free_blocks: BLOCK_COUNT - allocated_blocks,
        }
    }
}

impl Default for BlockAllocator {
    fn default() -> Self {
        Self::new()
    }
}
