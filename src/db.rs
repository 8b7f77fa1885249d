//! Task store and file helpers.
//!
//! This module provides the `Database` struct that owns the ordered task list,
//! its JSON persistence, timestamped backups, and the CSV import/export format.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReporterError, Result};
use crate::fields::*;
use crate::task::Task;

/// CSV header written by `to_csv` and required by `from_csv`.
pub const CSV_HEADER: &str = "description,status,priority";

const SEED: [(&str, Status, Priority); 10] = [
    ("Make Fajr Salaah", Status::Done, Priority::High),
    ("Fetch banana and water meal", Status::Done, Priority::Medium),
    ("Read Quran", Status::Done, Priority::High),
    ("Clean room", Status::Pending, Priority::Medium),
    ("Attain more LinkedIn connections", Status::Pending, Priority::Low),
    ("Rebook CPUT graduation ceremony ticket", Status::Pending, Priority::High),
    ("Schedule booking with dentist", Status::Pending, Priority::Medium),
    ("Help sister learn basic web development", Status::Pending, Priority::Medium),
    ("Do laundry", Status::Pending, Priority::High),
    ("Setup meetup with Abdul", Status::Pending, Priority::Low),
];

/// Ordered, append-only task collection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// The fixed task list a fresh store starts with.
    pub fn seeded() -> Self {
        let tasks = SEED
            .iter()
            .map(|&(description, status, priority)| Task {
                description: description.to_string(),
                status,
                priority,
            })
            .collect();
        Database { tasks }
    }

    /// Load the store from a JSON file, seeding it if the file doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no task file yet, using seeded tasks");
            return Ok(Database::seeded());
        }
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let db: Database = serde_json::from_str(&buf)?;
        debug!(path = %path.display(), count = db.tasks.len(), "loaded tasks");
        Ok(db)
    }

    /// Save the store to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Copy the store file to `<dir>/backup/<timestamp>_<file>`.
pub fn create_backup(db_path: &Path) -> Result<PathBuf> {
    if !db_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Task file does not exist",
        )
        .into());
    }

    let parent_dir = db_path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent_dir.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let file_name = db_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("tasks.json");
    let backup_path = backup_dir.join(format!("{}_{}", timestamp, file_name));

    fs::copy(db_path, &backup_path)?;
    Ok(backup_path)
}

/// Parse a status from free text (case-insensitive).
pub fn parse_status(s: &str) -> Result<Status> {
    match s.trim().to_lowercase().as_str() {
        "done" => Ok(Status::Done),
        "pending" => Ok(Status::Pending),
        other => Err(ReporterError::invalid_task(format!(
            "unknown status '{}'",
            other
        ))),
    }
}

/// Parse a priority from free text (case-insensitive).
pub fn parse_priority(s: &str) -> Result<Priority> {
    match s.trim().to_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        other => Err(ReporterError::invalid_task(format!(
            "unknown priority '{}'",
            other
        ))),
    }
}

fn status_value(s: Status) -> &'static str {
    match s {
        Status::Done => "done",
        Status::Pending => "pending",
    }
}

fn priority_value(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render tasks as CSV, header first.
pub fn to_csv(tasks: &[Task]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for task in tasks {
        out.push_str(&format!(
            "{},{},{}\n",
            escape_csv(&task.description),
            status_value(task.status),
            priority_value(task.priority)
        ));
    }
    out
}

/// Parse CSV produced by `to_csv`. Fails on the first bad record.
pub fn from_csv(content: &str) -> Result<Vec<Task>> {
    let mut records = parse_csv_records(content).into_iter();
    match records.next() {
        Some((_, header)) if header.iter().map(|f| f.trim()).eq(CSV_HEADER.split(',')) => {}
        Some((line, header)) => {
            return Err(ReporterError::Csv {
                line,
                reason: format!("expected header '{}', got '{}'", CSV_HEADER, header.join(",")),
            })
        }
        None => {
            return Err(ReporterError::Csv {
                line: 1,
                reason: "file is empty".into(),
            })
        }
    }

    let mut tasks = Vec::new();
    for (line_num, fields) in records {
        if fields.len() == 1 && fields[0].trim().is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(ReporterError::Csv {
                line: line_num,
                reason: format!("expected 3 fields, got {}", fields.len()),
            });
        }
        let task = parse_row(&fields).map_err(|e| ReporterError::Csv {
            line: line_num,
            reason: match e {
                ReporterError::InvalidTask { reason } => reason,
                other => other.to_string(),
            },
        })?;
        tasks.push(task);
    }
    Ok(tasks)
}

fn parse_row(fields: &[String]) -> Result<Task> {
    let status = parse_status(&fields[1])?;
    let priority = parse_priority(&fields[2])?;
    Task::new(&fields[0], status, priority)
}

/// Split CSV text into records, each tagged with the line it starts on.
/// Quoted fields may span lines.
fn parse_csv_records(content: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes => {}
            '\n' => {
                line += 1;
                if in_quotes {
                    current.push('\n');
                } else {
                    fields.push(std::mem::take(&mut current));
                    records.push((record_start, std::mem::take(&mut fields)));
                    record_start = line;
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push((record_start, fields));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_seeded_tasks() {
        let db = Database::seeded();
        assert_eq!(db.len(), 10);
        assert_eq!(db.tasks[0].description, "Make Fajr Salaah");
        assert_eq!(db.tasks[9].description, "Setup meetup with Abdul");
        assert_eq!(db.tasks.iter().filter(|t| t.is_done()).count(), 3);
    }

    #[test]
    fn test_seeded_tasks_pass_validation() {
        for task in Database::seeded().tasks {
            let rebuilt = Task::new(&task.description, task.status, task.priority).unwrap();
            assert_eq!(rebuilt, task);
        }
    }

    #[test]
    fn test_load_missing_file_seeds() {
        let dir = TempDir::new().unwrap();
        let db = Database::load(&dir.path().join("tasks.json")).unwrap();
        assert_eq!(db, Database::seeded());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let mut db = Database::seeded();
        db.tasks
            .push(Task::new("Finish async revision", Status::Pending, Priority::High).unwrap());
        db.save(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let loaded = Database::load(&path).unwrap();
        assert_eq!(loaded, db);
    }

    #[test]
    fn test_load_rejects_unknown_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"tasks":[{"description":"Clean room","status":"someday","priority":"low"}]}"#,
        )
        .unwrap();
        assert!(matches!(Database::load(&path), Err(ReporterError::Json(_))));
    }

    #[test]
    fn test_load_rejects_blank_description() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"tasks":[{"description":"   ","status":"pending","priority":"high"}]}"#,
        )
        .unwrap();
        match Database::load(&path) {
            Err(ReporterError::Json(e)) => {
                assert!(e.to_string().contains("description cannot be empty"))
            }
            other => panic!("expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        assert!(create_backup(&path).is_err());

        Database::seeded().save(&path).unwrap();
        let backup = create_backup(&path).unwrap();
        assert!(backup.starts_with(dir.path().join("backup")));
        assert!(backup.to_string_lossy().ends_with("_tasks.json"));
        assert_eq!(fs::read(&backup).unwrap(), fs::read(&path).unwrap());
    }

    #[test]
    fn test_parse_status_and_priority() {
        assert_eq!(parse_status(" Done ").unwrap(), Status::Done);
        assert_eq!(parse_status("PENDING").unwrap(), Status::Pending);
        assert!(parse_status("in-progress").is_err());
        assert_eq!(parse_priority("High").unwrap(), Priority::High);
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn test_csv_quotes_descriptions() {
        let tasks = vec![
            Task::new("Clean room, then rest", Status::Pending, Priority::Medium).unwrap(),
            Task::new("Say \"hi\"", Status::Done, Priority::Low).unwrap(),
        ];
        let csv = to_csv(&tasks);
        assert_eq!(
            csv,
            "description,status,priority\n\"Clean room, then rest\",pending,medium\n\"Say \"\"hi\"\"\",done,low\n"
        );
        assert_eq!(from_csv(&csv).unwrap(), tasks);
    }

    #[test]
    fn test_quoted_newline_stays_in_one_record() {
        let csv = "description,status,priority\n\"line one\nline two\",pending,low\nRead Quran,done,high\n";
        match from_csv(csv) {
            Err(ReporterError::Csv { line, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "description must be a single line");
            }
            other => panic!("expected CSV error, got {:?}", other),
        }

        let records = parse_csv_records(csv);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], (2, vec!["line one\nline two".to_string(), "pending".into(), "low".into()]));
        assert_eq!(records[2].0, 4);
    }

    #[test]
    fn test_export_import_round_trip() {
        let db = Database::seeded();
        let csv = to_csv(&db.tasks);
        assert_eq!(from_csv(&csv).unwrap(), db.tasks);
        assert_eq!(from_csv(&csv.replace('\n', "\r\n")).unwrap(), db.tasks);
    }

    #[test]
    fn test_from_csv_reports_bad_line() {
        let csv = "description,status,priority\nRead Quran,done,high\nClean room,later,low\n";
        match from_csv(csv) {
            Err(ReporterError::Csv { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, "unknown status 'later'");
            }
            other => panic!("expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_csv_rejects_bad_header_and_blank_description() {
        assert!(matches!(
            from_csv("title,status\n"),
            Err(ReporterError::Csv { line: 1, .. })
        ));
        assert!(matches!(
            from_csv("description,status,priority\n  ,done,low\n"),
            Err(ReporterError::Csv { line: 2, .. })
        ));
    }
}
