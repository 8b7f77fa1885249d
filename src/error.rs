//! Error types for the task reporter.

use thiserror::Error;

/// Main error type for task store and creation operations.
#[derive(Error, Debug)]
pub enum ReporterError {
    /// A task could not be constructed from the given input
    #[error("Invalid task: {reason}")]
    InvalidTask { reason: String },

    /// Asynchronous task creation was rejected
    #[error("Task creation failed: {reason}")]
    CreationFailed { reason: String },

    /// A CSV row could not be turned into a task
    #[error("CSV line {line}: {reason}")]
    Csv { line: usize, reason: String },

    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReporterError {
    /// Create an invalid task error
    pub fn invalid_task(reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            reason: reason.into(),
        }
    }

    /// Create a creation failure
    pub fn creation_failed(reason: impl Into<String>) -> Self {
        Self::CreationFailed {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReporterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ReporterError::invalid_task("description cannot be empty").to_string(),
            "Invalid task: description cannot be empty"
        );
        assert_eq!(
            ReporterError::creation_failed("Something went wrong").to_string(),
            "Task creation failed: Something went wrong"
        );
        let csv = ReporterError::Csv {
            line: 3,
            reason: "unknown status 'later'".into(),
        };
        assert_eq!(csv.to_string(), "CSV line 3: unknown status 'later'");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReporterError = io.into();
        assert!(matches!(err, ReporterError::Io(_)));
    }
}
