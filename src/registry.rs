use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{Error, Result};

/// A table with an open session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub table: String,
    pub started_at: DateTime<Local>,
}

/// Result of stopping an active session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub table: String,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub minutes: u64,
}

/// In-memory registry of running table timers.
///
/// Tables are kept in the order they were added. Nothing here is persisted;
/// dropping the registry discards every open session.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    sessions: Vec<ActiveSession>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `table` now
    pub fn add(&mut self, table: &str) -> Result<()> {
        self.add_at(table, Local::now())
    }

    /// Start a session for `table` at a given instant
    pub fn add_at(&mut self, table: &str, at: DateTime<Local>) -> Result<()> {
        if self.is_active(table) {
            return Err(Error::DuplicateTable(table.to_string()));
        }

        debug!(table, started_at = %at, "timer started");
        self.sessions.push(ActiveSession {
            table: table.to_string(),
            started_at: at,
        });
        Ok(())
    }

    /// Stop the session for `table` now.
    ///
    /// Returns `None` when the table has no open session, whether it was
    /// never added or was already stopped.
    pub fn stop(&mut self, table: &str) -> Option<CompletedSession> {
        self.stop_at(table, Local::now())
    }

    /// Stop the session for `table` at a given instant
    pub fn stop_at(&mut self, table: &str, at: DateTime<Local>) -> Option<CompletedSession> {
        let index = self.sessions.iter().position(|s| s.table == table)?;
        let session = self.sessions.remove(index);
        let minutes = elapsed_minutes(session.started_at, at);

        debug!(table, minutes, "timer stopped");
        Some(CompletedSession {
            table: session.table,
            started_at: session.started_at,
            ended_at: at,
            minutes,
        })
    }

    /// Snapshot of the open sessions in insertion order
    pub fn active_sessions(&self) -> Vec<ActiveSession> {
        self.sessions.clone()
    }

    pub fn started_at(&self, table: &str) -> Option<DateTime<Local>> {
        self.sessions
            .iter()
            .find(|s| s.table == table)
            .map(|s| s.started_at)
    }

    pub fn is_active(&self, table: &str) -> bool {
        self.sessions.iter().any(|s| s.table == table)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Whole minutes between two instants, floored, never negative
pub fn elapsed_minutes(start: DateTime<Local>, end: DateTime<Local>) -> u64 {
    let seconds = (end - start).num_seconds().max(0);
    (seconds / 60) as u64
}
