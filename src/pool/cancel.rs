//! Sticky, hierarchical cancellation flag
//!
//! A `CancelToken` is a shared boolean with an optional link to a parent
//! token. Reading a token also reads its ancestors; if any of them has been
//! tripped, the reader latches its own flag so the answer never flips back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    canceled: AtomicBool,
    parent: Option<Arc<Inner>>,
}

impl Inner {
    fn is_canceled(&self) -> bool {
        if self.canceled.load(Ordering::Acquire) {
            return true;
        }

        let parent_canceled = self
            .parent
            .as_ref()
            .is_some_and(|parent| parent.is_canceled());

        if parent_canceled {
            // Writes only ever go false -> true.
            self.canceled.store(true, Ordering::Release);
        }

        parent_canceled
    }
}

/// Cooperative stop signal shared between a canceller and any number of readers
///
/// Cloning a token yields a handle to the same flag. Use [`CancelToken::child`]
/// to derive a token that observes this one without being able to trip it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Creates a new root token that is not canceled
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that reports canceled once this token is tripped
    ///
    /// The child keeps the parent's flag alive, so a trip is still seen after
    /// every handle to the parent has been dropped.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                canceled: AtomicBool::new(false),
                parent: Some(Arc::clone(&self.inner)),
            }),
        }
    }

    /// Marks this token (and, through it, every descendant) as canceled
    ///
    /// Idempotent and safe to call from any thread.
    pub fn trip(&self) {
        if !self.inner.canceled.swap(true, Ordering::AcqRel) {
            tracing::debug!("Cancellation requested");
        }
    }

    /// Returns true if this token or any ancestor has been tripped
    ///
    /// Observing a canceled ancestor latches this token as well.
    pub fn is_canceled(&self) -> bool {
        self.inner.is_canceled()
    }
}
