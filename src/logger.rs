use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use csv::{StringRecord, Terminator, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::format::{format_clock, format_date};
use crate::registry::CompletedSession;

/// Default log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "arcade_log.csv";

/// Header row written when the log is created
pub const HEADER: [&str; 5] = ["Date", "Table", "Start Time", "End Time", "Minutes"];

/// One row of the session log, fields in column order.
///
/// Every field is kept exactly as stored, so a reloaded record matches what
/// was written byte for byte and a hand-edited row is still readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub date: String,
    pub table: String,
    pub start_time: String,
    pub end_time: String,
    pub minutes: String,
}

impl HistoryRecord {
    /// Build a record from a raw row; missing trailing fields read as empty
    fn from_row(row: &StringRecord) -> Self {
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        Self {
            date: field(0),
            table: field(1),
            start_time: field(2),
            end_time: field(3),
            minutes: field(4),
        }
    }

    /// The Minutes column as a number, if it holds one
    pub fn parsed_minutes(&self) -> Option<u64> {
        self.minutes.trim().parse().ok()
    }
}

/// Append-only CSV log of completed sessions
#[derive(Debug, Clone)]
pub struct SessionLogger {
    path: PathBuf,
}

impl SessionLogger {
    /// Open the log at `path`, creating it with its header row if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let logger = Self {
            path: path.as_ref().to_path_buf(),
        };
        logger.open_for_append()?;
        Ok(logger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one completed session.
    ///
    /// The row is dated with the end time's calendar day. The file is opened,
    /// written with a single call and closed again on every append.
    pub fn append(
        &self,
        table: &str,
        start: &DateTime<Local>,
        end: &DateTime<Local>,
        minutes: u64,
    ) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            date: format_date(end),
            table: table.to_string(),
            start_time: format_clock(start),
            end_time: format_clock(end),
            minutes: minutes.to_string(),
        };

        let row = encode_row(&record)?;
        let mut file = self.open_for_append()?;
        file.write_all(&row)?;

        debug!(
            path = %self.path.display(),
            table,
            minutes,
            "session appended"
        );
        Ok(record)
    }

    pub fn log_session(&self, session: &CompletedSession) -> Result<HistoryRecord> {
        self.append(
            &session.table,
            &session.started_at,
            &session.ended_at,
            session.minutes,
        )
    }

    /// All logged sessions, oldest first, header excluded.
    ///
    /// A missing log file yields an empty history. Rows are returned as
    /// stored: a short row or a non-numeric Minutes field doesn't hide the
    /// rest of the history. Only I/O and undecodable text are errors.
    pub fn load_history(&self) -> Result<Vec<HistoryRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(HistoryRecord::from_row(&row?));
        }

        debug!(path = %self.path.display(), count = records.len(), "history loaded");
        Ok(records)
    }

    /// Open the log in append mode, writing the header first if the file is
    /// new or empty
    fn open_for_append(&self) -> Result<File> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if file.metadata()?.len() == 0 {
            let mut writer = row_writer(Vec::new());
            writer.write_record(HEADER)?;
            let header = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
            file.write_all(&header)?;
            info!(path = %self.path.display(), "created session log");
        }

        Ok(file)
    }
}

fn row_writer<W: Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(inner)
}

fn encode_row(record: &HistoryRecord) -> Result<Vec<u8>> {
    let mut writer = row_writer(Vec::new());
    writer.serialize(record)?;
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}
