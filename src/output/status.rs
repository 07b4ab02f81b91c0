//! Per-task status reporting
//!
//! One status line is printed per task transition:
//!
//! | Transition | Line |
//! |------------|------|
//! | Started | `<url>: started` |
//! | Failed with error | `<url>: fail: <kind>: <message>` |
//! | Succeeded with no items | `<url>: fail` |
//! | Items written | `<url>: done` |

use crate::output::OutputWriter;
use crate::pool::Task;

/// Terminal status of a processed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task failed; `None` means it produced no items
    Failed(Option<String>),

    /// Every item was written
    Done { files: usize },
}

impl TaskStatus {
    /// Formats the status line for `url`
    pub fn line(&self, url: &str) -> String {
        match self {
            Self::Failed(Some(reason)) => format!("{}: fail: {}", url, reason),
            Self::Failed(None) => format!("{}: fail", url),
            Self::Done { .. } => format!("{}: done", url),
        }
    }
}

/// Formats the line printed when a task starts
pub fn started_line(task: &Task) -> String {
    format!("{}: started", task.input())
}

/// Persists a finished task's items and returns its terminal status
///
/// Write failures are reported as a failed status rather than an error, so
/// one bad write never affects other tasks.
pub async fn finish_task(writer: &OutputWriter, task: &Task) -> TaskStatus {
    if let Some(err) = task.error() {
        return TaskStatus::Failed(Some(err.to_string()));
    }

    let items = task.result().unwrap_or_default();
    if items.is_empty() {
        return TaskStatus::Failed(None);
    }

    match writer.write_items(items).await {
        Ok(files) => TaskStatus::Done { files: files.len() },
        Err(e) => {
            tracing::error!("Failed to write results for {}: {}", task.input(), e);
            TaskStatus::Failed(Some(format!("output: {}", e)))
        }
    }
}
