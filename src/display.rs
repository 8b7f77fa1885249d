//! Text rendering for tasks and reports.
//!
//! Nothing here prints. Each function returns the lines to show, in order, and
//! the command layer decides where they go.

use crate::fields::*;
use crate::report::TaskReport;
use crate::task::Task;

const DESCRIPTION_WIDTH: usize = 48;

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Done => "Done",
        Status::Pending => "Pending",
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Pair each task with its 1-based position.
pub fn numbered(tasks: &[Task]) -> impl Iterator<Item = (usize, &Task)> {
    tasks.iter().enumerate().map(|(i, t)| (i + 1, t))
}

/// Table of tasks, header first. Each task comes paired with its 1-based
/// position in the store so filtered listings still show stable numbers.
pub fn task_lines<'a>(tasks: impl IntoIterator<Item = (usize, &'a Task)>) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<4} {:<8} {:<7} {}",
        "#", "Status", "Pri", "Description"
    )];
    for (pos, t) in tasks {
        lines.push(format!(
            "{:<4} {:<8} {:<7} {}",
            pos,
            format_status(t.status),
            format_priority(t.priority),
            truncate(&t.description, DESCRIPTION_WIDTH)
        ));
    }
    lines
}

/// One-line summary of a task.
pub fn task_sentence(task: &Task) -> String {
    format!(
        "{} | Status {} | Priority is {}",
        task.description,
        format_status(task.status).to_lowercase(),
        format_priority(task.priority).to_lowercase()
    )
}

/// Message for whether a priority class has been fully resolved.
pub fn resolution_message(priority: Priority, resolved: bool) -> String {
    let label = format_priority(priority).to_lowercase();
    if resolved {
        format!("All {} priority tasks are done.", label)
    } else {
        format!("Some {} priority tasks are still pending.", label)
    }
}

/// Human-readable summary of a report.
pub fn report_lines(report: &TaskReport) -> Vec<String> {
    let mut lines = vec![
        format!("Tasks:   {}", report.total),
        format!("Done:    {}", report.by_status.done),
        format!("Pending: {}", report.by_status.pending),
        String::new(),
        format!("{:<8} {:>5} {:>8}", "Priority", "Done", "Pending"),
    ];
    for row in &report.by_priority {
        lines.push(format!(
            "{:<8} {:>5} {:>8}",
            format_priority(row.priority),
            row.done,
            row.pending
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "High priority pending: {}",
        report.high_priority_pending
    ));
    lines.push(resolution_message(
        Priority::High,
        report.all_high_priority_done,
    ));
    lines
}
