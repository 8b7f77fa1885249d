use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed task list with status and priority reports.
/// Storage defaults to ~/.tasks/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tasks", version, about = "Task list with status and priority reports")]
pub struct Cli {
    /// Path to the JSON task file.
    #[arg(long, global = true, env = "TASKS_DB")]
    pub db: Option<PathBuf>,

    /// Verbose logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
