//! Player-facing event log.
//!
//! The tick engine reports what happened as `(message, severity)` pairs. The
//! driver stamps them with the game time and keeps a bounded rolling log,
//! most recent entry first, for the presentation layer.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogSeverity {
    Info,
    Warning,
    Critical,
}

/// One line produced by a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub severity: LogSeverity,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: LogSeverity::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: LogSeverity::Warning,
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: LogSeverity::Critical,
        }
    }
}

/// A log line stamped with the game time it happened at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedLogEntry {
    /// Unique within one log; increases with insertion order.
    pub seq: u64,
    /// `HH:MM`
    pub time: String,
    pub message: String,
    pub severity: LogSeverity,
}

/// Bounded, most-recent-first rolling log.
///
/// # Example
///
/// ```rust
/// use stadium_security_core_rs::models::{EventLog, LogEntry};
///
/// let mut log = EventLog::with_capacity(2);
/// log.push("18:00", LogEntry::info("first"));
/// log.push("18:01", LogEntry::info("second"));
/// log.push("18:02", LogEntry::info("third"));
///
/// let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
/// assert_eq!(messages, vec!["third", "second"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<TimedLogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Prepend an entry, dropping the oldest beyond capacity.
    pub fn push(&mut self, time: &str, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(TimedLogEntry {
            seq: self.next_seq,
            time: time.to_string(),
            message: entry.message,
            severity: entry.severity,
        });
        self.next_seq += 1;
        self.entries.truncate(self.capacity);
    }

    /// Prepend a tick's entries in the order they happened.
    pub fn extend(&mut self, time: &str, entries: impl IntoIterator<Item = LogEntry>) {
        for entry in entries {
            self.push(time, entry);
        }
    }

    /// Newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TimedLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&TimedLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn count_severity(&self, severity: LogSeverity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }
}
