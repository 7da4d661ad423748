mod command;
mod config;
mod display;
mod shell;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use table_timer::SessionLogger;
use tracing_subscriber::EnvFilter;

use config::Config;
use display::{history_table, select_history};
use shell::Shell;

#[derive(Parser, Debug)]
#[command(
    version = option_env!("VERGEN_GIT_DESCRIBE"),
    about = "Track play time on named tables and log finished sessions to CSV."
)]
struct CliArgs {
    /// CSV session log [default: $TABLE_TIMER_LOG_FILE or arcade_log.csv]
    #[arg(short, long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Interactive shell (the default)
    Shell,
    /// Print logged sessions, newest first
    History {
        /// Only the most recent N sessions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print in file order instead
        #[arg(long)]
        oldest_first: bool,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_history(
    logger: &SessionLogger,
    limit: Option<usize>,
    oldest_first: bool,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let records = logger
        .load_history()
        .with_context(|| format!("Error reading session log {}", logger.path().display()))?;

    if json {
        let selected = select_history(&records, limit, !oldest_first);
        serde_json::to_writer_pretty(&mut *out, &selected).context("Error encoding history")?;
        writeln!(out)?;
    } else {
        for line in history_table(&records, limit, !oldest_first) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let config = Config::from_env().with_log_file(args.log_file);
    let logger = SessionLogger::open(&config.log_file)
        .with_context(|| format!("Error opening session log {}", config.log_file.display()))?;

    match args.command.unwrap_or(CliCommand::Shell) {
        CliCommand::Shell => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Shell::new(logger, config.refresh_interval)
                .run(stdin.lock(), &mut stdout.lock())
                .context("Error running shell")?;
        }
        CliCommand::History {
            limit,
            oldest_first,
            json,
        } => {
            let stdout = io::stdout();
            print_history(&logger, limit, oldest_first, json, &mut stdout.lock())?;
        }
    }

    Ok(())
}
