use chrono::{DateTime, Local};
use colored::*;
use table_timer::{format_clock, format_elapsed, ActiveSession, HistoryRecord};

/// Active timers as a table of name, start time and running time
pub fn active_table(sessions: &[ActiveSession], now: &DateTime<Local>) -> Vec<String> {
    if sessions.is_empty() {
        return vec!["No active timers.".dimmed().to_string()];
    }

    let mut lines = Vec::with_capacity(sessions.len() + 1);
    lines.push(
        format!("{:<24} {:<10} {:>8}", "Table Name", "Start Time", "Elapsed")
            .cyan()
            .bold()
            .to_string(),
    );
    for session in sessions {
        lines.push(format!(
            "{:<24} {:<10} {:>8}",
            session.table,
            format_clock(&session.started_at),
            format_elapsed(&session.started_at, now)
        ));
    }
    lines
}

/// The `limit` most recent records, newest first or in file order
pub fn select_history(
    records: &[HistoryRecord],
    limit: Option<usize>,
    newest_first: bool,
) -> Vec<&HistoryRecord> {
    let take = limit.unwrap_or(records.len()).min(records.len());
    let recent = records[records.len() - take..].iter();
    if newest_first {
        recent.rev().collect()
    } else {
        recent.collect()
    }
}

/// History rows, newest first, optionally cut to the `limit` most recent
pub fn history_table(
    records: &[HistoryRecord],
    limit: Option<usize>,
    newest_first: bool,
) -> Vec<String> {
    if records.is_empty() {
        return vec!["No sessions logged yet.".dimmed().to_string()];
    }

    let selected = select_history(records, limit, newest_first);

    let mut lines = Vec::with_capacity(selected.len() + 1);
    lines.push(
        format!("{:<12} {:<12} {:<8} {:<8} {}", "Date", "Table", "Start", "End", "Minutes")
            .cyan()
            .bold()
            .to_string(),
    );
    for record in selected {
        lines.push(history_row(record));
    }
    lines
}

pub fn history_row(record: &HistoryRecord) -> String {
    format!(
        "{:<12} {:<12} {:<8} {:<8} {} min",
        record.date, record.table, record.start_time, record.end_time, record.minutes
    )
}
