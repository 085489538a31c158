/*!
 * Activity Log
 * Bounded, timestamped record of simulation events for the display layer
 */

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use time::OffsetDateTime;

/// Maximum retained entries; the oldest is evicted beyond this
pub const LOG_CAPACITY: usize = 100;

/// Severity hint for display; carries no behavioral difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Success => write!(f, "OK"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// One activity log entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LogEntry {
    /// Monotonic sequence number, unique across evictions
    pub seq: u64,
    pub message: String,
    pub level: LogLevel,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// FIFO-bounded activity log
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, level: LogLevel) {
        self.next_seq += 1;
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            message: message.into(),
            level,
            timestamp: OffsetDateTime::now_utc(),
        });
        if self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries oldest-first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
