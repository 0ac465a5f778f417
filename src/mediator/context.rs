//! Context passed to request handlers.
//!
//! One context is built per dispatch and dropped when the handler returns,
//! so a handler sees exactly one store session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::DispatchError;

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a host can keep one clone and cancel an
/// in-flight dispatch running elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The context passed to every request handler.
///
/// Generic over `S`, the store type, so handlers work against whatever
/// store the mediator was built with.
pub struct Context<'a, S> {
    request_name: &'static str,
    store: &'a S,
    cancellation: &'a Cancellation,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(request_name: &'static str, store: &'a S, cancellation: &'a Cancellation) -> Self {
        Self {
            request_name,
            store,
            cancellation,
        }
    }

    /// Name of the request being handled.
    pub fn request_name(&self) -> &'static str {
        self.request_name
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        self.store
    }

    /// Fail with `Cancelled` if the caller gave up. Call before each store
    /// operation.
    pub fn ensure_active(&self) -> Result<(), DispatchError> {
        if self.cancellation.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        Ok(())
    }
}
