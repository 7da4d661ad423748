use std::path::PathBuf;
use std::time::Duration;

use table_timer::DEFAULT_LOG_FILE;
use tracing::warn;

pub const LOG_FILE_VAR: &str = "TABLE_TIMER_LOG_FILE";
pub const REFRESH_MS_VAR: &str = "TABLE_TIMER_REFRESH_MS";

const DEFAULT_REFRESH: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub struct Config {
    pub log_file: PathBuf,
    /// Redraw interval of the `watch` command
    pub refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let refresh_interval = match lookup(REFRESH_MS_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid {}", REFRESH_MS_VAR);
                    DEFAULT_REFRESH
                }
            },
            None => DEFAULT_REFRESH,
        };

        Self {
            log_file: PathBuf::from(log_file),
            refresh_interval,
        }
    }

    /// A path given on the command line wins over the environment
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }
}
