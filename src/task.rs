//! Task data structure.
//!
//! A `Task` is immutable once built: the store only ever appends new ones.
//! Fields are public for reading and pattern matching; every constructor path,
//! including deserialization, goes through `Task::new`.

use serde::{Deserialize, Serialize};

use crate::error::{ReporterError, Result};
use crate::fields::*;

/// A single to-do item with its status and priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    pub description: String,
    pub status: Status,
    pub priority: Priority,
}

impl Task {
    /// Build a task, trimming the description and rejecting blank or
    /// multi-line ones.
    pub fn new(description: impl AsRef<str>, status: Status, priority: Priority) -> Result<Self> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(ReporterError::invalid_task("description cannot be empty"));
        }
        if description.contains(['\n', '\r']) {
            return Err(ReporterError::invalid_task(
                "description must be a single line",
            ));
        }
        Ok(Task {
            description: description.to_string(),
            status,
            priority,
        })
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}

/// Unchecked shape of a task as stored on disk.
#[derive(Deserialize)]
struct RawTask {
    description: String,
    status: Status,
    priority: Priority,
}

impl TryFrom<RawTask> for Task {
    type Error = ReporterError;

    fn try_from(raw: RawTask) -> Result<Self> {
        Task::new(raw.description, raw.status, raw.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_description() {
        let task = Task::new("  Do laundry \n", Status::Pending, Priority::High).unwrap();
        assert_eq!(task.description, "Do laundry");
        assert!(!task.is_done());
    }

    #[test]
    fn test_new_rejects_blank_description() {
        let err = Task::new("   ", Status::Done, Priority::Low).unwrap_err();
        assert!(matches!(err, ReporterError::InvalidTask { .. }));
    }

    #[test]
    fn test_new_rejects_multiline_description() {
        for text in ["line one\nline two", "line one\r\nline two"] {
            match Task::new(text, Status::Pending, Priority::Low) {
                Err(ReporterError::InvalidTask { reason }) => {
                    assert_eq!(reason, "description must be a single line")
                }
                other => panic!("expected InvalidTask, got {:?}", other),
            }
        }
        // Surrounding whitespace is trimmed, not rejected
        assert!(Task::new("\nDo laundry\n", Status::Pending, Priority::High).is_ok());
    }

    #[test]
    fn test_deserialize_validates_description() {
        let blank = r#"{"description":"   ","status":"pending","priority":"high"}"#;
        let err = serde_json::from_str::<Task>(blank).unwrap_err();
        assert!(err.to_string().contains("description cannot be empty"));

        let multiline = r#"{"description":"a\nb","status":"pending","priority":"high"}"#;
        assert!(serde_json::from_str::<Task>(multiline).is_err());

        let padded = r#"{"description":"  Read Quran ","status":"done","priority":"high"}"#;
        let task = serde_json::from_str::<Task>(padded).unwrap();
        assert_eq!(task, Task::new("Read Quran", Status::Done, Priority::High).unwrap());
    }

    #[test]
    fn test_serde_uses_lowercase_values() {
        let task = Task::new("Read Quran", Status::Done, Priority::High).unwrap();
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"description":"Read Quran","status":"done","priority":"high"}"#
        );
    }

    #[test]
    fn test_unknown_status_does_not_deserialize() {
        let json = r#"{"description":"Clean room","status":"later","priority":"low"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
