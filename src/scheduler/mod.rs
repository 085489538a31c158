/*!
 * CPU Scheduler
 * Round-robin dispatch, one quantum per invoked cycle
 */

pub mod types;

pub use types::{CycleOutcome, SchedulerStats};

use crate::core::types::Pid;
use crate::process::{ProcessHandle, ProcessState};
use log::info;
use std::collections::VecDeque;

/// Round-robin CPU scheduler
///
/// Maintains a FIFO ready queue of shared process records. Each invoked
/// cycle grants exactly one quantum to the head of the queue and rotates it
/// to the tail unless it finished. `current` is only occupied transiently
/// within a cycle; between cycles it is always `None`.
#[derive(Debug)]
pub struct Scheduler {
    ready_queue: VecDeque<ProcessHandle>,
    current: Option<ProcessHandle>,
    total_cycles: u64,
    completed: u64,
    paused: bool,
    /// Units of remaining cost granted per dispatch. Fixed at 1 in this
    /// design; the field exists for extension.
    quantum: u32,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready_queue: VecDeque::new(),
            current: None,
            total_cycles: 0,
            completed: 0,
            paused: false,
            quantum: 1,
        }
    }

    /// Admit a process to the tail of the ready queue, marking it `Ready`.
    /// Returns the informational message the kernel records.
    pub fn enqueue(&mut self, handle: ProcessHandle) -> String {
        let pid = {
            let mut process = handle.write();
            process.state = ProcessState::Ready;
            process.pid
        };
        self.ready_queue.push_back(handle);
        info!("Process {} added to the ready queue", pid);
        format!("Process PID={} added to the scheduling queue", pid)
    }

    /// Drop a queued process by pid. Does not touch `current`, which is
    /// never occupied between cycles anyway.
    pub fn remove(&mut self, pid: Pid) -> bool {
        if let Some(position) = self
            .ready_queue
            .iter()
            .position(|handle| handle.read().pid == pid)
        {
            self.ready_queue.remove(position);
            info!("Process {} removed from the ready queue", pid);
            true
        } else {
            false
        }
    }

    /// Run one round-robin cycle.
    ///
    /// Steps: gate on pause/empty queue, count the cycle, pop the FIFO head,
    /// and advance it by one quantum. A cycle that completes its process
    /// returns right there; otherwise the process rotates to the tail and one
    /// unit of wait time is charged to every process left in the queue (the
    /// rotated process included).
    pub fn run_cycle(&mut self) -> CycleOutcome {
        if self.paused || self.ready_queue.is_empty() {
            return CycleOutcome::skipped("Scheduler paused or queue empty");
        }

        self.total_cycles += 1;
        let mut trace = Vec::new();

        if self.current.is_none() {
            // Terminated records cannot be advanced; a killed process may
            // only linger here if the kernel's dequeue was bypassed.
            while let Some(handle) = self.ready_queue.pop_front() {
                if handle.read().state.is_terminated() {
                    continue;
                }
                {
                    let process = handle.read();
                    trace.push(format!(
                        "Cycle #{}: dequeued PID={} ({})",
                        self.total_cycles, process.pid, process.name
                    ));
                }
                self.current = Some(handle);
                break;
            }
        }

        let Some(current) = self.current.take() else {
            trace.push("Ready queue held only terminated processes".to_string());
            return CycleOutcome {
                executed: true,
                trace,
                finished: None,
            };
        };

        let (pid, finished) = {
            let mut process = current.write();
            trace.push(format!(
                "Executing PID={} - remaining time: {}",
                process.pid, process.remaining_cpu
            ));
            let finished = process.advance();
            (process.pid, finished)
        };

        if finished {
            self.completed += 1;
            trace.push(format!("PID={} has finished execution", pid));
            // A finishing cycle ends here: no rotation happened, so nobody
            // is charged wait time.
            return CycleOutcome {
                executed: true,
                trace,
                finished: Some(pid),
            };
        }

        trace.push(format!("PID={} returns to the queue (round-robin)", pid));
        self.ready_queue.push_back(current);

        // Everything still queued waited out this cycle, the rotated
        // process included.
        if self.ready_queue.is_empty() {
            trace.push("Queue empty".to_string());
        } else {
            let mut queued = Vec::with_capacity(self.ready_queue.len());
            for handle in &self.ready_queue {
                let mut process = handle.write();
                process.wait_time += 1;
                queued.push(format!("PID={}", process.pid));
            }
            trace.push(format!("Queue state: {}", queued.join(", ")));
        }

        CycleOutcome {
            executed: true,
            trace,
            finished: None,
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        let average_wait_time = if self.ready_queue.is_empty() {
            0.0
        } else {
            let total_wait: u64 = self
                .ready_queue
                .iter()
                .map(|handle| handle.read().wait_time)
                .sum();
            total_wait as f64 / self.ready_queue.len() as f64
        };

        let throughput = if self.total_cycles > 0 {
            self.completed as f64 / self.total_cycles as f64 * 100.0
        } else {
            0.0
        };

        SchedulerStats {
            total_cycles: self.total_cycles,
            completed: self.completed,
            average_wait_time,
            throughput,
        }
    }

    /// Toggle the pause gate; while paused, `run_cycle` is a no-op.
    pub fn pause(&mut self) -> &'static str {
        self.paused = !self.paused;
        if self.paused {
            "Scheduler paused"
        } else {
            "Scheduler resumed"
        }
    }

    /// Clear the queue and counters. Does not touch the kernel's process
    /// registry or the allocator.
    pub fn reset(&mut self) {
        self.ready_queue.clear();
        self.current = None;
        self.total_cycles = 0;
        self.completed = 0;
        self.paused = false;
        info!("Scheduler reset");
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    #[must_use]
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    #[inline]
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.ready_queue.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ready_queue.is_empty()
    }

    /// Pid of the process holding the CPU, if mid-cycle
    #[must_use]
    pub fn current(&self) -> Option<Pid> {
        self.current.as_ref().map(|handle| handle.read().pid)
    }

    /// Queue contents, head first, for the display layer
    #[must_use]
    pub fn queued_pids(&self) -> Vec<Pid> {
        self.ready_queue
            .iter()
            .map(|handle| handle.read().pid)
            .collect()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn handle(pid: Pid, cost: u32) -> ProcessHandle {
        Process::new(pid, format!("p{pid}"), 10, Some(cost)).into_handle()
    }

    #[test]
    fn test_empty_queue_does_not_count_cycles() {
        let mut scheduler = Scheduler::new();
        let outcome = scheduler.run_cycle();

        assert!(!outcome.executed);
        assert_eq!(scheduler.stats().total_cycles, 0);
    }

    #[test]
    fn test_paused_scheduler_skips() {
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(handle(1, 2));

        assert_eq!(scheduler.pause(), "Scheduler paused");
        assert!(!scheduler.run_cycle().executed);
        assert_eq!(scheduler.pause(), "Scheduler resumed");
        assert!(scheduler.run_cycle().executed);
    }

    #[test]
    fn test_round_robin_rotation() {
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(handle(1, 2));
        scheduler.enqueue(handle(2, 2));

        let outcome = scheduler.run_cycle();
        assert!(outcome.executed);
        assert_eq!(outcome.finished, None);
        // P1 rotated behind P2
        assert_eq!(scheduler.queued_pids(), vec![2, 1]);
    }

    #[test]
    fn test_finished_process_leaves_scheduler() {
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(handle(1, 1));

        let outcome = scheduler.run_cycle();
        assert_eq!(outcome.finished, Some(1));
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.current(), None);
        assert_eq!(scheduler.stats().completed, 1);
    }

    #[test]
    fn test_reset_clears_counters_and_queue() {
        let mut scheduler = Scheduler::new();
        scheduler.enqueue(handle(1, 3));
        scheduler.run_cycle();
        scheduler.pause();

        scheduler.reset();
        let stats = scheduler.stats();
        assert_eq!(stats.total_cycles, 0);
        assert_eq!(stats.completed, 0);
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_paused());
    }
}
