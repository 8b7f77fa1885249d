//! Delayed task creation.
//!
//! Creating a task completes after a delay and then either appends the task or
//! rejects. Callers await the result before reading the collection again, so
//! the append is always observed before any report that depends on it.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::{ReporterError, Result};
use crate::task::Task;

/// Delay applied before a new task lands, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1000;

const FAILURE_REASON: &str = "Something went wrong";

/// Settings for a creation: how long it takes and whether it is rejected.
#[derive(Debug, Clone)]
pub struct Creator {
    pub delay: Duration,
    pub fail: bool,
}

impl Default for Creator {
    fn default() -> Self {
        Creator {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            fail: false,
        }
    }
}

impl Creator {
    pub fn with_delay(delay: Duration) -> Self {
        Creator {
            delay,
            ..Creator::default()
        }
    }

    /// Make every creation from this `Creator` reject.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    async fn settle(&self, task: &Task) -> Result<()> {
        debug!(delay = ?self.delay, description = %task.description, "creating task");
        tokio::time::sleep(self.delay).await;
        if self.fail {
            warn!(description = %task.description, "task creation rejected");
            return Err(ReporterError::creation_failed(FAILURE_REASON));
        }
        Ok(())
    }

    /// Append `task` to an owned collection once the delay has elapsed.
    ///
    /// The returned collection keeps the prior order and ends with `task`.
    pub async fn append_task(&self, mut tasks: Vec<Task>, task: Task) -> Result<Vec<Task>> {
        self.settle(&task).await?;
        tasks.push(task);
        info!(count = tasks.len(), "task created");
        Ok(tasks)
    }

    /// Append `task` to the store, returning the new length.
    ///
    /// A rejected creation leaves the store untouched.
    pub async fn append_to(&self, db: &mut Database, task: Task) -> Result<usize> {
        self.settle(&task).await?;
        db.tasks.push(task);
        info!(count = db.len(), "task created");
        Ok(db.len())
    }

    /// Append `task`, then run `then` against the updated store.
    pub async fn append_then<R>(
        &self,
        db: &mut Database,
        task: Task,
        then: impl FnOnce(&Database) -> R,
    ) -> Result<R> {
        self.append_to(db, task).await?;
        Ok(then(db))
    }
}
