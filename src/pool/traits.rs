//! Pluggable fetch strategy consumed by the worker pool

use crate::pool::NewsItem;
use crate::FetchError;

/// A blocking fetch-and-extract operation
///
/// Implementations run on an isolate thread, never on the scheduler, so they
/// are free to block on network I/O. They must be thread-safe because every
/// worker in the pool shares one instance.
pub trait FetchOperation: Send + Sync + 'static {
    /// Fetches `target` and extracts its news items
    ///
    /// # Returns
    ///
    /// * `Ok(items)` - Extracted items; an empty list means nothing applicable
    /// * `Err(FetchError)` - The fetch itself failed
    fn fetch(&self, target: &str) -> Result<Vec<NewsItem>, FetchError>;
}

impl<F> FetchOperation for F
where
    F: Fn(&str) -> Result<Vec<NewsItem>, FetchError> + Send + Sync + 'static,
{
    fn fetch(&self, target: &str) -> Result<Vec<NewsItem>, FetchError> {
        self(target)
    }
}
