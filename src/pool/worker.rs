//! Fixed-size worker pool
//!
//! `WorkerPool::run` drives `worker_count` workers on the caller's task. The
//! workers share one [`TaskSource`] and each loops over:
//!
//! 1. pull the next task (stop when the source is exhausted)
//! 2. await the task's `on_started` hook
//! 3. run the fetch operation through [`isolate`] and record the outcome
//! 4. await the task's `on_done` hook
//!
//! Only the fetch leaves the scheduling context, so at most `worker_count`
//! blocking threads exist at any moment. A hook that panics costs only its own
//! task: a failed `on_started` fails the task without fetching it, and a failed
//! `on_done` is logged.

use crate::pool::{
    isolate, CancelToken, FetchOperation, Hook, NewsItem, Task, TaskError, TaskSource,
};
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Totals gathered over one [`WorkerPool::run`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Tasks whose fetch succeeded (including empty results)
    pub completed: usize,

    /// Tasks that ended with an error outcome
    pub failed: usize,

    /// Whether cancellation cut the run short
    ///
    /// False when the source was drained before any worker observed the
    /// cancellation.
    pub canceled: bool,
}

impl RunReport {
    /// Number of tasks that reached `on_done`
    pub fn processed(&self) -> usize {
        self.completed + self.failed
    }
}

#[derive(Debug, Default)]
struct WorkerStats {
    completed: usize,
    failed: usize,
    canceled: bool,
}

/// Bounded-concurrency executor for fetch tasks
pub struct WorkerPool {
    operation: Arc<dyn FetchOperation>,
}

impl WorkerPool {
    /// Creates a pool that fetches every task with `operation`
    pub fn new<O: FetchOperation>(operation: O) -> Self {
        Self {
            operation: Arc::new(operation),
        }
    }

    /// Drains `source` with `worker_count` concurrent workers
    ///
    /// Returns once every worker has stopped, either because the source is
    /// exhausted or because `cancel` was tripped. Cancellation is cooperative:
    /// a fetch already in flight runs to completion before its worker exits.
    ///
    /// # Arguments
    ///
    /// * `source` - Shared task sequence
    /// * `worker_count` - Number of workers; zero is treated as one
    /// * `cancel` - Token observed by every worker between steps
    ///
    /// # Returns
    ///
    /// A [`RunReport`]. Individual task failures are recorded on the tasks;
    /// the run as a whole cannot fail.
    pub async fn run(
        &self,
        source: &TaskSource,
        worker_count: usize,
        cancel: &CancelToken,
    ) -> RunReport {
        let worker_count = if worker_count == 0 {
            tracing::warn!("Worker count of 0 requested, using 1");
            1
        } else {
            worker_count
        };

        let shutdown = cancel.child();
        let start_time = Instant::now();
        tracing::info!("Starting {} workers", worker_count);

        let workers = (0..worker_count).map(|id| self.worker(id, source, &shutdown));
        let stats = join_all(workers).await;

        let mut report = RunReport::default();
        for worker in stats {
            report.completed += worker.completed;
            report.failed += worker.failed;
            report.canceled |= worker.canceled;
        }

        tracing::info!(
            "Pool finished: {} completed, {} failed, canceled={}, in {:?}",
            report.completed,
            report.failed,
            report.canceled,
            start_time.elapsed()
        );

        report
    }

    async fn worker(&self, id: usize, source: &TaskSource, cancel: &CancelToken) -> WorkerStats {
        let mut stats = WorkerStats::default();

        loop {
            if cancel.is_canceled() {
                tracing::debug!("Worker {} stopping: cancellation requested", id);
                stats.canceled |= !source.is_exhausted();
                break;
            }

            let Some(mut task) = source.next_task() else {
                tracing::debug!("Worker {} stopping: no more tasks", id);
                break;
            };

            tracing::debug!("Worker {} picked up {}", id, task.input());

            let started = match task.on_started() {
                Some(hook) => run_hook(hook, &task, "on_started").await,
                None => Ok(()),
            };

            let outcome = if let Err(e) = started {
                Err(e)
            } else if cancel.is_canceled() {
                stats.canceled = true;
                Err(TaskError::new(
                    "Canceled",
                    "cancellation requested before fetch",
                ))
            } else {
                self.fetch(&task).await
            };

            match &outcome {
                Ok(items) => {
                    stats.completed += 1;
                    tracing::debug!("{} yielded {} items", task.input(), items.len());
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!("{} failed: {}", task.input(), e);
                }
            }
            task.record(outcome);

            if let Some(hook) = task.on_done() {
                // The outcome is already counted; a failing hook only loses its side effects.
                let _ = run_hook(hook, &task, "on_done").await;
            }
        }

        stats
    }

    async fn fetch(&self, task: &Task) -> Result<Vec<NewsItem>, TaskError> {
        let operation = Arc::clone(&self.operation);
        let target = task.input().to_string();
        isolate(move || operation.fetch(&target)).await
    }
}

/// Awaits `hook`, converting a panic into a `TaskError`
async fn run_hook(hook: &Hook, task: &Task, name: &str) -> Result<(), TaskError> {
    match AssertUnwindSafe(hook(task)).catch_unwind().await {
        Ok(()) => Ok(()),
        Err(payload) => {
            let err = TaskError::from_panic(payload);
            tracing::error!("{} hook for {} panicked: {}", name, task.input(), err.message);
            Err(err)
        }
    }
}
