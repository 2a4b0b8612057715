//! Per-match event log

use super::entities::GameEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub event: GameEvent,
}

/// In-memory record of everything published during one match
///
/// Revealed to every seat after the match so they can reflect on it before
/// casting award ballots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLog {
    entries: Vec<LogEntry>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: GameEvent) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            event,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter().map(|e| &e.event)
    }

    /// One narrative line per event
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.event.narrative())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
