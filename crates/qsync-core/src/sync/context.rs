//! Per-sync context shared with plugins

use crate::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle that requests cancellation of a running sync.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// User-visible output and cancellation state for one sync.
#[derive(Debug, Default)]
pub struct SyncContext {
    output: Vec<String>,
    cancel: CancelHandle,
}

impl SyncContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a line of user-visible sync output.
    pub fn output(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("{message}");
        self.output.push(message);
    }

    /// Lines recorded so far.
    pub fn messages(&self) -> &[String] {
        &self.output
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail with [`Error::Cancelled`] once cancellation was requested.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
