//! The narrative event log.
//!
//! Subsystems report what happened ("Flight 747 has departed safely.")
//! through the [`EventSink`] trait. Logging is fire-and-forget: a sink never
//! feeds anything back into the simulation, and losing a line changes
//! nothing about the simulation state.

use std::collections::VecDeque;

use paradise_types::{LogEntry, Severity};
use tracing::{info, warn};

/// Receiver for narrative log lines.
pub trait EventSink {
    /// Record one line.
    fn log(&mut self, message: &str, severity: Severity);
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn log(&mut self, _message: &str, _severity: Severity) {}
}

/// Forwards lines to `tracing`; alerts are logged at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Alert => warn!(target: "paradise::events", "{message}"),
            Severity::Normal | Severity::Success => {
                info!(target: "paradise::events", severity = ?severity, "{message}");
            }
        }
    }
}

/// Bounded feed of the most recent lines, newest first.
#[derive(Debug, Clone)]
pub struct RecentEvents {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RecentEvents {
    /// Feed size used by the on-screen log.
    pub const DEFAULT_CAPACITY: usize = 10;

    /// An empty feed keeping at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the feed for a renderer.
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl EventSink for RecentEvents {
    fn log(&mut self, message: &str, severity: Severity) {
        self.entries.push_front(LogEntry::new(message, severity));
        self.entries.truncate(self.capacity);
    }
}

/// The simulation's log: a recent-events feed plus an outside sink.
pub struct Journal {
    feed: RecentEvents,
    sink: Box<dyn EventSink + Send>,
}

impl Journal {
    /// Feed of `capacity` entries forwarding to `sink`.
    pub fn new(capacity: usize, sink: Box<dyn EventSink + Send>) -> Self {
        Self {
            feed: RecentEvents::with_capacity(capacity),
            sink,
        }
    }

    /// The recent-events feed.
    pub const fn feed(&self) -> &RecentEvents {
        &self.feed
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(RecentEvents::DEFAULT_CAPACITY, Box::new(NullSink))
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal").field("feed", &self.feed).finish_non_exhaustive()
    }
}

impl EventSink for Journal {
    fn log(&mut self, message: &str, severity: Severity) {
        self.feed.log(message, severity);
        self.sink.log(message, severity);
    }
}
