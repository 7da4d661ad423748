//! Field and display formats shared by the log and any front-end.

use chrono::{DateTime, Local};

/// Log date format, `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Log time-of-day format, 24-hour `HH:MM`
pub const TIME_FORMAT: &str = "%H:%M";

pub fn format_date(ts: &DateTime<Local>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

pub fn format_clock(ts: &DateTime<Local>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

/// Running time of an open session as `HH:MM`
pub fn format_elapsed(start: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let seconds = (*now - *start).num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:02}:{:02}", hours, minutes)
}

/// Summary of a finished session, e.g. `1h 37m` or `5m`
pub fn format_played(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_log_field_formats() {
        let start = Local.with_ymd_and_hms(2024, 1, 9, 7, 3, 59).unwrap();
        assert_eq!(format_date(&start), "2024-01-09");
        assert_eq!(format_clock(&start), "07:03");
        assert_eq!(format_clock(&ts(15, 42, 0)), "15:42");
    }

    #[test]
    fn test_format_elapsed() {
        let start = ts(10, 0, 0);
        assert_eq!(format_elapsed(&start, &start), "00:00");
        assert_eq!(format_elapsed(&start, &(start + Duration::seconds(59))), "00:00");
        assert_eq!(format_elapsed(&start, &(start + Duration::minutes(61))), "01:01");
        assert_eq!(format_elapsed(&start, &(start + Duration::hours(12))), "12:00");
        assert_eq!(format_elapsed(&start, &(start + Duration::hours(123))), "123:00");
        assert_eq!(format_elapsed(&start, &(start - Duration::minutes(5))), "00:00");
    }

    #[test]
    fn test_format_played() {
        assert_eq!(format_played(0), "0m");
        assert_eq!(format_played(5), "5m");
        assert_eq!(format_played(60), "1h 0m");
        assert_eq!(format_played(97), "1h 37m");
        assert_eq!(format_played(600), "10h 0m");
    }
}
