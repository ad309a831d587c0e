//! Revocable preview handles
//!
//! Every attachment in a draft owns one preview handle, acquired when the
//! attachment enters the draft and released exactly once when it leaves
//! (removal, replacement, post-submit reset, or teardown). The registry
//! counts outstanding handles so a leak shows up as a nonzero count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Process-wide registry of outstanding preview handles
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    outstanding: Arc<AtomicUsize>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a fresh handle; the count rises until the handle is released.
    pub fn acquire(&self) -> PreviewHandle {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        PreviewHandle {
            token: format!("preview://{}", Uuid::new_v4()),
            outstanding: Arc::clone(&self.outstanding),
            released: false,
        }
    }

    /// Number of handles acquired but not yet released
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

/// A single revocable preview reference.
///
/// Not `Clone`: each handle is released exactly once, either explicitly via
/// [`PreviewHandle::revoke`] or implicitly on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    token: String,
    outstanding: Arc<AtomicUsize>,
    released: bool,
}

impl PreviewHandle {
    /// Opaque token a front-end can use to look up or render the preview
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Release the handle. Idempotent; the registry count drops only once.
    pub fn revoke(&mut self) {
        if !self.released {
            self.released = true;
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.revoke();
    }
}
