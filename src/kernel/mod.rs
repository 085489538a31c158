/*!
 * Kernel
 * Orchestrates the allocator, the scheduler, the process registry, and the
 * activity log; dispatches parsed shell commands
 */

pub mod command;
pub mod log;

pub use command::{Command, CommandError};
pub use log::{ActivityLog, LogEntry, LogLevel, LOG_CAPACITY};

use crate::core::errors::KernelResult;
use crate::core::types::{Mb, Pid};
use crate::memory::{BlockAllocator, DEFAULT_CAPACITY_MB};
use crate::process::{Process, ProcessError, ProcessHandle, ProcessResult, ProcessState};
use crate::scheduler::Scheduler;
use rand::Rng;
use std::ops::RangeInclusive;

/// Default memory demand drawn when `run` gives none, in MB
const DEFAULT_DEMAND_MB: RangeInclusive<Mb> = 10..=50;

/// Simulation kernel
///
/// One explicitly constructed instance per simulation; no global state.
/// Every operation is synchronous and completes before returning, and the
/// caller is responsible for serializing invocations.
pub struct Kernel {
    allocator: BlockAllocator,
    scheduler: Scheduler,
    /// Append-only registry of every process ever created; terminated
    /// processes are retained for audit and display
    processes: Vec<ProcessHandle>,
    log: ActivityLog,
    /// Monotonic pid counter; ids are consumed even by failed creations
    next_pid: Pid,
}

impl Kernel {
    #[must_use]
    pub fn new() -> Self {
        Self::with_memory(DEFAULT_CAPACITY_MB)
    }

    #[must_use]
    pub fn with_memory(total_mb: Mb) -> Self {
        let mut kernel = Self {
            allocator: BlockAllocator::with_capacity(total_mb),
            scheduler: Scheduler::new(),
            processes: Vec::new(),
            log: ActivityLog::new(),
            next_pid: 1,
        };
        kernel.log("OS simulator started", LogLevel::Info);
        kernel.log(
            format!("Total memory: {total_mb} MB available"),
            LogLevel::Info,
        );
        kernel.log("Round-robin scheduler active", LogLevel::Info);
        kernel.log("Ready for commands...", LogLevel::Info);
        kernel
    }

    /// Create a process, reserving memory first.
    ///
    /// The pid is consumed before the allocation attempt, so a failed
    /// creation leaves a gap in the id sequence. Memory demand defaults to a
    /// uniform draw from 10..=50 MB.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        memory_mb: Option<Mb>,
        cpu_cost: Option<u32>,
    ) -> KernelResult<ProcessHandle> {
        let demand = memory_mb.unwrap_or_else(|| rand::thread_rng().gen_range(DEFAULT_DEMAND_MB));
        let pid = self.next_pid;
        self.next_pid += 1;

        let process = Process::new(pid, name, demand, cpu_cost);
        self.allocator.allocate(pid, demand)?;

        let handle = process.into_handle();
        self.processes.push(handle.clone());
        let message = self.scheduler.enqueue(handle.clone());

        self.log(
            format!("Process created: PID={pid}, memory={demand} MB"),
            LogLevel::Success,
        );
        self.log(message, LogLevel::Info);
        Ok(handle)
    }

    /// [`Kernel::spawn`] with the failure reported to the activity log,
    /// matching the shell surface: `None` means insufficient memory.
    pub fn create_process(
        &mut self,
        name: &str,
        memory_mb: Option<Mb>,
        cpu_cost: Option<u32>,
    ) -> Option<ProcessHandle> {
        match self.spawn(name, memory_mb, cpu_cost) {
            Ok(handle) => Some(handle),
            Err(err) => {
                self.log(
                    format!("Could not create process {name} - {err}"),
                    LogLevel::Error,
                );
                None
            }
        }
    }

    /// Terminate a process by pid: mark it terminated, release its memory,
    /// and drop it from the ready queue. Logs a warning and returns `false`
    /// when no matching process exists.
    pub fn kill_process(&mut self, pid: Pid) -> bool {
        match self.terminate(pid) {
            Ok(()) => {
                self.log(format!("Process PID={pid} terminated"), LogLevel::Warning);
                true
            }
            Err(err) => {
                self.log(err.to_string(), LogLevel::Warning);
                false
            }
        }
    }

    fn terminate(&mut self, pid: Pid) -> ProcessResult<()> {
        // A process qualifies while it is not yet terminated, or - for the
        // natural-completion path, where advance() already flipped the state -
        // while it still holds an allocation to release.
        let handle = self
            .processes
            .iter()
            .find(|handle| {
                let process = handle.read();
                process.pid == pid
                    && (!process.state.is_terminated() || self.allocator.owns(pid))
            })
            .cloned()
            .ok_or(ProcessError::NotFound(pid))?;

        handle.write().state = ProcessState::Terminated;
        self.allocator.free(pid);
        self.scheduler.remove(pid);
        Ok(())
    }

    /// Advance the scheduler by one cycle, recording its trace line by line.
    /// A process that finished naturally is reaped through [`Kernel::kill_process`],
    /// the sole path that releases its memory.
    pub fn run_scheduler_cycle(&mut self) -> bool {
        let outcome = self.scheduler.run_cycle();

        if !outcome.executed {
            for line in outcome.trace {
                self.log(line, LogLevel::Warning);
            }
            return false;
        }

        for line in outcome.trace {
            self.log(line, LogLevel::Info);
        }
        if let Some(pid) = outcome.finished {
            self.kill_process(pid);
        }
        true
    }

    /// Tokenize and dispatch one shell command line
    pub fn execute_command(&mut self, input: &str) {
        match Command::parse(input) {
            Ok(Command::Ps) => self.list_processes(),
            Ok(Command::Run { name }) => {
                let name = name.unwrap_or_else(|| {
                    format!("process_{}", rand::thread_rng().gen_range(0..100))
                });
                self.create_process(&name, None, None);
            }
            Ok(Command::Kill { pid }) => {
                self.kill_process(pid);
            }
            Ok(Command::Mem) => {
                let message = format!(
                    "Memory: {}/{} MB available",
                    self.allocator.available_mb(),
                    self.allocator.total_mb()
                );
                self.log(message, LogLevel::Info);
            }
            Ok(Command::Compact) => {
                self.allocator.compact();
                self.log("Memory compacted", LogLevel::Success);
            }
            Ok(Command::Cycle) => {
                self.run_scheduler_cycle();
            }
            Ok(Command::Help) => self.print_help(),
            Ok(Command::Clear) => self.log.clear(),
            Err(CommandError::Empty) => {}
            Err(err) => self.log(err.to_string(), LogLevel::Error),
        }
    }

    fn list_processes(&mut self) {
        let active: Vec<ProcessHandle> = self
            .processes
            .iter()
            .filter(|handle| !handle.read().state.is_terminated())
            .cloned()
            .collect();

        self.log(format!("Active processes: {}", active.len()), LogLevel::Info);
        for handle in active {
            let line = {
                let p = handle.read();
                format!(
                    "PID={}, {}, state={}, mem={} MB, cpu={}/{}",
                    p.pid, p.name, p.state, p.memory_mb, p.remaining_cpu, p.total_cpu
                )
            };
            self.log(line, LogLevel::Info);
        }
    }

    fn print_help(&mut self) {
        const HELP: [&str; 9] = [
            "Available commands:",
            "ps - list active processes",
            "run [name] - create a new process",
            "kill <pid> - terminate a process",
            "mem - show memory state",
            "compactar - compact memory",
            "ciclo - run one scheduler cycle",
            "clear - clear the log",
            "help - show this list",
        ];
        for line in HELP {
            self.log(line, LogLevel::Info);
        }
    }

    /// Append a timestamped entry to the bounded activity log
    pub fn log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.log.push(message, level);
    }

    // Read surface for the display layer

    /// Every process ever created, in creation order
    #[must_use]
    pub fn processes(&self) -> &[ProcessHandle] {
        &self.processes
    }

    /// Registry lookup by pid
    #[must_use]
    pub fn process(&self, pid: Pid) -> Option<ProcessHandle> {
        self.processes
            .iter()
            .find(|handle| handle.read().pid == pid)
            .cloned()
    }

    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &BlockAllocator {
        &self.allocator
    }

    #[inline]
    #[must_use]
    pub fn allocator_mut(&mut self) -> &mut BlockAllocator {
        &mut self.allocator
    }

    #[inline]
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    #[must_use]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Activity log entries, oldest first
    pub fn log_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.entries()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}
