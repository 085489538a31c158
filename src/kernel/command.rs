/*!
 * Shell Commands
 * Closed command grammar for the simulation shell, parsed up front
 */

use crate::core::types::Pid;
use thiserror::Error;

/// Parsed shell command. The first token is matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ps` - list active (non-terminated) processes
    Ps,
    /// `run [name]` - create a process with default random memory/cpu
    Run { name: Option<String> },
    /// `kill <pid>` - terminate a process by id
    Kill { pid: Pid },
    /// `mem` - report available/total memory
    Mem,
    /// `compactar` - compact memory
    Compact,
    /// `ciclo` / `schedule` - run one scheduler cycle
    Cycle,
    /// `help` - list commands
    Help,
    /// `clear` - empty the activity log
    Clear,
}

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("Specify a valid PID")]
    InvalidPid,

    #[error("Command not recognized: {0}")]
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut tokens = input.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(CommandError::Empty);
        };

        match first.to_ascii_lowercase().as_str() {
            "ps" => Ok(Command::Ps),
            "run" => Ok(Command::Run {
                name: tokens.next().map(str::to_owned),
            }),
            "kill" => tokens
                .next()
                .and_then(|arg| arg.parse::<Pid>().ok())
                .map(|pid| Command::Kill { pid })
                .ok_or(CommandError::InvalidPid),
            "mem" => Ok(Command::Mem),
            "compactar" => Ok(Command::Compact),
            "ciclo" | "schedule" => Ok(Command::Cycle),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}
