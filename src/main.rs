//! # tasks - status and priority reports for a small task list
//!
//! A command-line task list that keeps an ordered set of tasks, each with a
//! status (`done` / `pending`) and a priority (`low` / `medium` / `high`), and
//! answers the questions you ask of such a list: how much is done, what is
//! still pending, and whether every high-priority item has been dealt with.
//!
//! ## Quick Start
//!
//! ```bash
//! # See the starter list
//! tasks list
//!
//! # Add a task (lands after a short delay, then the list is shown)
//! tasks add "Finish async revision" --priority high
//!
//! # Summaries
//! tasks report
//! tasks report --json
//! tasks check --priority high
//! ```
//!
//! Data is stored in `~/.tasks/tasks.json` unless `--db` or `TASKS_DB` points
//! elsewhere. A missing file starts from the built-in starter list. Set
//! `RUST_LOG` or pass `--verbose` for diagnostic logging on stderr.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod create;
pub mod db;
pub mod display;
pub mod error;
pub mod fields;
pub mod report;
pub mod task;

use cli::Cli;
use cmd::*;
use db::*;

fn init_tracing(verbose: bool) {
    let default = if verbose { "tasks=debug,info" } else { "tasks=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_db_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".tasks").join("tasks.json")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Commands that don't touch the store
    match cli.command {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            return;
        }
        Commands::Reset { no_backup } => {
            let db_path = cli.db.unwrap_or_else(default_db_path);
            cmd_reset(&db_path, no_backup);
            return;
        }
        _ => {}
    }

    let db_path = cli.db.unwrap_or_else(default_db_path);
    debug!(path = %db_path.display(), "using task file");

    let mut db = match Database::load(&db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to load tasks from {}: {e}", db_path.display());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),
        Commands::Reset { .. } => unreachable!("reset handled above"),

        Commands::List { status, priority, limit } => cmd_list(&db, status, priority, limit),

        Commands::Pending => cmd_pending(&db),

        Commands::Add { description, status, priority, delay_ms, simulate_failure } => {
            cmd_add(&mut db, &db_path, description, status, priority, delay_ms, simulate_failure)
                .await
        }

        Commands::Report { json } => cmd_report(&db, json),

        Commands::Check { priority } => cmd_check(&db, priority),

        Commands::Export { output } => cmd_export(&db, output),

        Commands::Import { input, no_backup } => cmd_import(&mut db, &db_path, input, no_backup),
    }
}
