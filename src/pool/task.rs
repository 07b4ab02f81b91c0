//! Task and outcome data structures

use crate::FetchError;
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// One extracted news record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub body: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Failure of a single task, recorded as data on the task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TaskError {
    /// Failure class, e.g. `Timeout` or `Panic`
    pub kind: String,

    /// Human-readable description
    pub message: String,
}

impl TaskError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Converts a panic payload caught at a thread boundary
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::new("Panic", message)
    }
}

impl From<FetchError> for TaskError {
    fn from(err: FetchError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("{:?}", err.kind()), err.to_string())
    }
}

/// Result of processing a task: extracted items (possibly none) or an error
pub type Outcome = Result<Vec<NewsItem>, TaskError>;

/// Asynchronous callback invoked by a worker with the task it is processing
pub type Hook = Arc<dyn for<'a> Fn(&'a Task) -> BoxFuture<'a, ()> + Send + Sync>;

/// One unit of work: a fetch target, optional hooks and a write-once outcome
pub struct Task {
    input: String,
    on_started: Option<Hook>,
    on_done: Option<Hook>,
    outcome: Option<Outcome>,
}

impl Task {
    /// Creates a task for the given fetch target
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            on_started: None,
            on_done: None,
            outcome: None,
        }
    }

    /// Sets the hook awaited before the fetch starts
    pub fn with_on_started<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a Task) -> BoxFuture<'a, ()> + Send + Sync + 'static,
    {
        self.on_started = Some(Arc::new(hook));
        self
    }

    /// Sets the hook awaited after the outcome has been recorded
    pub fn with_on_done<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a Task) -> BoxFuture<'a, ()> + Send + Sync + 'static,
    {
        self.on_done = Some(Arc::new(hook));
        self
    }

    /// The fetch target
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The recorded outcome, `None` until a worker has processed the task
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// The extracted items, if the task succeeded
    pub fn result(&self) -> Option<&[NewsItem]> {
        match &self.outcome {
            Some(Ok(items)) => Some(items),
            _ => None,
        }
    }

    /// The error descriptor, if the task failed
    pub fn error(&self) -> Option<&TaskError> {
        match &self.outcome {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn on_started(&self) -> Option<&Hook> {
        self.on_started.as_ref()
    }

    pub(crate) fn on_done(&self) -> Option<&Hook> {
        self.on_done.as_ref()
    }

    /// Stores the outcome; only the first write is kept
    pub(crate) fn record(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            tracing::warn!("Outcome for {} already recorded, ignoring", self.input);
            return;
        }
        self.outcome = Some(outcome);
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("input", &self.input)
            .field("on_started", &self.on_started.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("outcome", &self.outcome)
            .finish()
    }
}
