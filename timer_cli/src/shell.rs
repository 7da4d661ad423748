use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use chrono::Local;
use colored::*;
use table_timer::{format_clock, format_played, Error, SessionLogger, TimerRegistry};
use tracing::{debug, error};

use crate::command::{parse_command, Command};
use crate::display::{active_table, history_table};

const DEFAULT_WATCH_TICKS: u32 = 10;

const HELP: &str = "\
Commands:
  add <name>       start timing a table
  stop <name>      stop a table and log the session
  list             show active timers (alias: status)
  watch [ticks]    refresh the active timers every tick
  history [n]      show logged sessions, newest first
  help             show this help
  quit             leave (active timers are discarded)";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front-end over one registry and one log
pub struct Shell {
    timers: TimerRegistry,
    logger: SessionLogger,
    refresh_interval: Duration,
}

impl Shell {
    pub fn new(logger: SessionLogger, refresh_interval: Duration) -> Self {
        Self {
            timers: TimerRegistry::new(),
            logger,
            refresh_interval,
        }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Logging sessions to {}. Type 'help' for commands.",
            self.logger.path().display()
        )?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    writeln!(out)?;
                    self.leave(out)?;
                    return Ok(());
                }
            };

            if self.execute_line(&line, out)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                let message = e.to_string().yellow();
                writeln!(out, "{}. Type 'help' for the list of commands.", message)?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "shell command");

        match command {
            Command::Add(name) => self.add(&name, out)?,
            Command::Stop(name) => self.stop(&name, out)?,
            Command::List => self.list(out)?,
            Command::Watch(ticks) => self.watch(ticks.unwrap_or(DEFAULT_WATCH_TICKS), out)?,
            Command::History(limit) => self.history(limit, out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {
                self.leave(out)?;
                return Ok(Flow::Quit);
            }
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, name: &str, out: &mut W) -> io::Result<()> {
        if name.is_empty() {
            return writeln!(out, "{}", "Please enter a table name.".yellow());
        }

        match self.timers.add(name) {
            Ok(()) => {
                let started = self
                    .timers
                    .started_at(name)
                    .map(|ts| format_clock(&ts))
                    .unwrap_or_default();
                writeln!(out, "{}", format!("Started '{}' at {}.", name, started).green())
            }
            Err(Error::DuplicateTable(_)) => {
                writeln!(out, "{}", "That table already exists.".yellow())
            }
            Err(e) => writeln!(out, "{}", e.to_string().red()),
        }
    }

    fn stop<W: Write>(&mut self, name: &str, out: &mut W) -> io::Result<()> {
        if name.is_empty() {
            return writeln!(out, "{}", "Please enter a table name.".yellow());
        }

        let Some(session) = self.timers.stop(name) else {
            return writeln!(out, "{}", format!("No active timer for '{}'.", name).dimmed());
        };

        if let Err(e) = self.logger.log_session(&session) {
            error!(table = %session.table, error = %e, "failed to log session");
            writeln!(
                out,
                "{}",
                format!(
                    "Failed to write {}: {}. The session for '{}' ({}) was not logged.",
                    self.logger.path().display(),
                    e,
                    session.table,
                    format_played(session.minutes)
                )
                .red()
            )?;
            return Ok(());
        }

        writeln!(
            out,
            "{}",
            format!(
                "Table '{}' played for {}.",
                session.table,
                format_played(session.minutes)
            )
            .green()
            .bold()
        )
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let now = Local::now();
        for line in active_table(&self.timers.active_sessions(), &now) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn watch<W: Write>(&self, ticks: u32, out: &mut W) -> io::Result<()> {
        for tick in 0..ticks {
            if tick > 0 {
                thread::sleep(self.refresh_interval);
                writeln!(out)?;
            }
            self.list(out)?;
            out.flush()?;
        }
        Ok(())
    }

    fn history<W: Write>(&self, limit: Option<usize>, out: &mut W) -> io::Result<()> {
        match self.logger.load_history() {
            Ok(records) => {
                for line in history_table(&records, limit, true) {
                    writeln!(out, "{}", line)?;
                }
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load history");
                writeln!(out, "{}", format!("Failed to read history: {}", e).red())
            }
        }
    }

    fn leave<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let open = self.timers.len();
        if open > 0 {
            writeln!(
                out,
                "{}",
                format!("Discarding {} active timer(s).", open).yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn shell() -> (TempDir, Shell) {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let logger = SessionLogger::open(dir.path().join("arcade_log.csv")).unwrap();
        (dir, Shell::new(logger, Duration::ZERO))
    }

    fn run(shell: &mut Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_list_stop_logs_session() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "add Table 3\nlist\nstop Table 3\nquit\n");

        assert!(output.contains("Started 'Table 3' at"));
        assert!(output.contains("Table Name"));
        assert!(output.contains("Table 'Table 3' played for 0m."));
        assert!(!output.contains("Discarding"));

        let history = shell.logger.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].table, "Table 3");
        assert_eq!(history[0].minutes, "0");
    }

    #[test]
    fn test_duplicate_and_empty_names_warn() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "add A\nadd A\nadd\nadd   \nstop\n");

        assert_eq!(output.matches("That table already exists.").count(), 1);
        assert_eq!(output.matches("Please enter a table name.").count(), 3);
        assert_eq!(shell.timers.len(), 1);
    }

    #[test]
    fn test_stop_unknown_table_logs_nothing() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "stop Z\n");

        assert!(output.contains("No active timer for 'Z'."));
        assert!(shell.logger.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let (_dir, mut shell) = shell();
        let output = run(
            &mut shell,
            "add First\nstop First\nadd Second\nstop Second\nhistory\n",
        );

        let second = output.find("Second      ").unwrap();
        let first = output.find("First       ").unwrap();
        assert!(second < first);

        let limited = run(&mut shell, "history 1\n");
        assert!(limited.contains("Second"));
        assert!(!limited.contains("First"));
    }

    #[test]
    fn test_watch_redraws_each_tick() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "add Pool\nwatch 3\n");
        assert_eq!(output.matches("Table Name").count(), 3);
    }

    #[test]
    fn test_end_of_input_discards_open_timers() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "add A\nadd B\n");
        assert!(output.contains("Discarding 2 active timer(s)."));
    }

    #[test]
    fn test_bad_commands_keep_shell_running() {
        let (_dir, mut shell) = shell();
        let output = run(&mut shell, "launch A\nhistory lots\nhelp\nadd A\n");

        assert!(output.contains("Unknown command 'launch'"));
        assert!(output.contains("'history' expects a number, got 'lots'"));
        assert!(output.contains("stop <name>"));
        assert!(shell.timers.is_active("A"));
    }

    #[test]
    fn test_log_write_failure_is_reported() {
        let (dir, mut shell) = shell();
        // Swap the log file for a directory so the append fails
        let path = dir.path().join("arcade_log.csv");
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let output = run(&mut shell, "add A\nstop A\nlist\n");
        assert!(output.contains("was not logged"));
        assert!(output.contains("No active timers."));
    }
}
