//! Play-time tracking for named tables.
//!
//! [`TimerRegistry`] keeps the open sessions in memory, [`SessionLogger`]
//! appends finished ones to a CSV log and reads them back. The two don't know
//! about each other; a front-end stops a table in the registry and hands the
//! [`CompletedSession`] to the logger.
//!
//! ```no_run
//! use table_timer::{SessionLogger, TimerRegistry, DEFAULT_LOG_FILE};
//!
//! # fn main() -> table_timer::Result<()> {
//! let logger = SessionLogger::open(DEFAULT_LOG_FILE)?;
//! let mut timers = TimerRegistry::new();
//!
//! timers.add("Table 3")?;
//! if let Some(done) = timers.stop("Table 3") {
//!     logger.log_session(&done)?;
//! }
//! for record in logger.load_history()?.iter().rev() {
//!     println!("{} {} {} min", record.date, record.table, record.minutes);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;
pub mod logger;
pub mod registry;

pub use error::{Error, Result};
pub use format::{format_clock, format_date, format_elapsed, format_played};
pub use logger::{HistoryRecord, SessionLogger, DEFAULT_LOG_FILE, HEADER};
pub use registry::{elapsed_minutes, ActiveSession, CompletedSession, TimerRegistry};
