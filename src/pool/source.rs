//! Shared, exactly-once task sequence

use crate::pool::Task;
use std::sync::{Mutex, PoisonError};

struct Cursor {
    tasks: Box<dyn Iterator<Item = Task> + Send>,
    exhausted: bool,
}

/// A single task sequence pulled from by many workers
///
/// Every underlying item is handed to exactly one caller of
/// [`TaskSource::next_task`]. Once the producer runs dry the source stays
/// exhausted, even if the producer would yield again later.
pub struct TaskSource {
    cursor: Mutex<Cursor>,
}

impl TaskSource {
    /// Wraps a (possibly lazy) task producer
    pub fn new<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = Task>,
        I::IntoIter: Send + 'static,
    {
        Self {
            cursor: Mutex::new(Cursor {
                tasks: Box::new(tasks.into_iter()),
                exhausted: false,
            }),
        }
    }

    /// Creates a source that yields nothing
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<Task>())
    }

    /// Takes the next task, or `None` once the sequence is exhausted
    pub fn next_task(&self) -> Option<Task> {
        // A producer that panicked mid-call leaves no partial state behind.
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);

        if cursor.exhausted {
            return None;
        }

        let next = cursor.tasks.next();
        if next.is_none() {
            tracing::debug!("Task source exhausted");
            cursor.exhausted = true;
        }
        next
    }

    /// Returns true once the producer has reported its end
    pub fn is_exhausted(&self) -> bool {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .exhausted
    }
}

impl std::fmt::Debug for TaskSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSource")
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}
