//! Blocking-call isolation boundary
//!
//! [`isolate`] moves one blocking operation onto a freshly spawned OS thread
//! and suspends the calling task until that thread reports back. Errors and
//! panics raised by the operation are turned into [`TaskError`] values at the
//! thread boundary; nothing is re-raised into the caller.
//!
//! There is no deadline here. If the operation never returns, neither does the
//! future; bound the operation itself (e.g. with a request timeout) instead.

use crate::pool::TaskError;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tokio::sync::oneshot;

/// Runs `operation` on a dedicated thread and returns its outcome as data
///
/// # Arguments
///
/// * `operation` - Blocking closure producing a value or an error
///
/// # Returns
///
/// * `Ok(T)` - The operation returned a value
/// * `Err(TaskError)` - The operation returned an error, panicked, or the
///   thread could not be started
///
/// # Example
///
/// ```
/// use newsfetch::pool::{isolate, TaskError};
///
/// # async fn example() {
/// let value = isolate(|| Ok::<_, TaskError>(21 * 2)).await;
/// assert_eq!(value, Ok(42));
///
/// let failed = isolate(|| -> Result<(), TaskError> { panic!("boom") }).await;
/// assert_eq!(failed.unwrap_err().kind, "Panic");
/// # }
/// ```
pub async fn isolate<F, T, E>(operation: F) -> Result<T, TaskError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<TaskError> + 'static,
{
    let (done_tx, done_rx) = oneshot::channel();

    let spawned = thread::Builder::new()
        .name("newsfetch-isolate".to_string())
        .spawn(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(operation)) {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(err.into()),
                Err(payload) => Err(TaskError::from_panic(payload)),
            };
            // The receiver only disappears if the caller stopped waiting.
            let _ = done_tx.send(outcome);
        });

    let handle = match spawned {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to spawn isolate thread: {}", e);
            return Err(TaskError::new("Spawn", e.to_string()));
        }
    };

    let outcome = match done_rx.await {
        Ok(outcome) => outcome,
        Err(_) => Err(TaskError::new(
            "Disconnected",
            "isolate thread exited without reporting an outcome",
        )),
    };

    // The thread has already sent its outcome, so this only waits for it to exit.
    if handle.join().is_err() {
        tracing::warn!("Isolate thread panicked after reporting its outcome");
    }

    outcome
}
