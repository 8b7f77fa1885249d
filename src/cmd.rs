//! Command implementations for the CLI interface.
//!
//! Each handler loads nothing itself: `main` hands it the store and its path.
//! Handlers print to stdout, report failures on stderr, and exit non-zero.

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::{error, info};

use crate::create::{Creator, DEFAULT_DELAY_MS};
use crate::db::*;
use crate::display::*;
use crate::fields::*;
use crate::report::*;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks with optional filters.
    List {
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show pending tasks as one-line summaries.
    Pending,

    /// Add a new task. Creation completes after a delay.
    Add {
        /// What needs doing.
        description: String,
        /// Status: done | pending.
        #[arg(long, value_enum, default_value_t = Status::Pending)]
        status: Status,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Creation delay in milliseconds.
        #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,
        /// Reject the creation instead of appending.
        #[arg(long, hide = true)]
        simulate_failure: bool,
    },

    /// Summarise tasks by status and priority.
    Report {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check whether every task of a priority is done. Exits 1 if not.
    Check {
        /// Priority class to check.
        #[arg(long, value_enum, default_value_t = Priority::High)]
        priority: Priority,
    },

    /// Replace all tasks with the starter list.
    Reset {
        /// Skip creating backup before reset
        #[arg(long)]
        no_backup: bool,
    },

    /// Export tasks to CSV format.
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(long, short)]
        output: Option<String>,
    },

    /// Import tasks from CSV format, appending them in file order.
    Import {
        /// Input CSV file path
        input: String,
        /// Skip creating backup before import
        #[arg(long)]
        no_backup: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn save_or_exit(db: &Database, db_path: &Path) {
    if let Err(e) = db.save(db_path) {
        error!(error = %e, "failed to save tasks");
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
}

fn backup_or_exit(db_path: &Path) {
    // Nothing on disk yet means the seeded list was never saved.
    if !db_path.exists() {
        return;
    }
    match create_backup(db_path) {
        Ok(backup_path) => println!("Created backup: {}", backup_path.display()),
        Err(e) => {
            eprintln!("Failed to create backup: {e}");
            std::process::exit(1);
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// List tasks with optional filtering.
pub fn cmd_list(
    db: &Database,
    status: Option<Status>,
    priority: Option<Priority>,
    limit: Option<usize>,
) {
    let rows: Vec<(usize, &Task)> = numbered(&db.tasks)
        .filter(|(_, t)| status.map_or(true, |s| t.status == s))
        .filter(|(_, t)| priority.map_or(true, |p| t.priority == p))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if rows.is_empty() {
        println!("No tasks");
        return;
    }
    print_lines(&task_lines(rows));
}

/// Print every pending task as a sentence.
pub fn cmd_pending(db: &Database) {
    let pending = pending_tasks(&db.tasks);
    if pending.is_empty() {
        println!("No pending tasks");
        return;
    }
    for task in pending {
        println!("{}", task_sentence(task));
    }
}

/// Create a task after the configured delay, save, then list the store.
pub async fn cmd_add(
    db: &mut Database,
    db_path: &Path,
    description: String,
    status: Status,
    priority: Priority,
    delay_ms: u64,
    simulate_failure: bool,
) {
    let task = match Task::new(&description, status, priority) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut creator = Creator::with_delay(Duration::from_millis(delay_ms));
    if simulate_failure {
        creator = creator.failing();
    }

    match creator
        .append_then(db, task, |db| task_lines(numbered(&db.tasks)))
        .await
    {
        Ok(lines) => {
            save_or_exit(db, db_path);
            println!("Added task {}", db.len());
            print_lines(&lines);
        }
        Err(e) => {
            error!(error = %e, "task was not added");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Print the status and priority summary.
pub fn cmd_report(db: &Database, json: bool) {
    let report = TaskReport::build(&db.tasks);
    if !json {
        print_lines(&report_lines(&report));
        return;
    }
    match serde_json::to_string_pretty(&report) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Failed to serialise report: {e}");
            std::process::exit(1);
        }
    }
}

/// Report whether a priority class is fully resolved.
pub fn cmd_check(db: &Database, priority: Priority) {
    let resolved = all_done_with(&db.tasks, priority);
    println!("{}", resolution_message(priority, resolved));
    if !resolved {
        let pending = count_pending_with(&db.tasks, priority);
        info!(?priority, pending, "priority class unresolved");
        std::process::exit(1);
    }
}

/// Overwrite the store with the seeded task list.
pub fn cmd_reset(db_path: &Path, no_backup: bool) {
    if !no_backup {
        backup_or_exit(db_path);
    }
    let db = Database::seeded();
    save_or_exit(&db, db_path);
    println!("Reset to {} starter tasks", db.len());
}

/// Export tasks as CSV to a file or stdout.
pub fn cmd_export(db: &Database, output: Option<String>) {
    let csv = to_csv(&db.tasks);
    match output {
        None => print!("{csv}"),
        Some(path) => match fs::write(&path, csv) {
            Ok(_) => println!("Exported {} task(s) to {}", db.len(), path),
            Err(e) => {
                eprintln!("Failed to write CSV file: {e}");
                std::process::exit(1);
            }
        },
    }
}

/// Import tasks from CSV. Either every row is appended or none are.
pub fn cmd_import(db: &mut Database, db_path: &Path, input: String, no_backup: bool) {
    let content = match fs::read_to_string(&input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read CSV file '{}': {}", input, e);
            std::process::exit(1);
        }
    };
    let tasks = match from_csv(&content) {
        Ok(tasks) => tasks,
        Err(e) => {
            error!(error = %e, file = %input, "import rejected");
            eprintln!("Import failed: {e}");
            std::process::exit(1);
        }
    };

    if !no_backup {
        backup_or_exit(db_path);
    }
    let imported = tasks.len();
    db.tasks.extend(tasks);
    save_or_exit(db, db_path);
    println!("Imported {} task(s)", imported);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
