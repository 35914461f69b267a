//! The sync transaction boundary
//!
//! All live-model reads and writes of one sync happen inside a single
//! [`SyncTransaction::run`] call. The host guarantees exclusive write access
//! for the duration of the body and publishes every staged mutation together
//! when the body returns `Ok`. When the body returns `Err` nothing is
//! published and the error is handed back unchanged.

use crate::Result;
use crate::model::ModifiableModels;
use std::sync::Arc;

/// Atomic, exclusive access to the live project model.
pub trait SyncTransaction {
    /// Run `body` against the live model and commit its mutations as one unit.
    ///
    /// Blocks until exclusive write access is available. There is no retry:
    /// a failed body leaves the model exactly as it was before the call.
    fn run<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ModifiableModels) -> Result<T>;
}

impl<H: SyncTransaction> SyncTransaction for Arc<H> {
    fn run<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ModifiableModels) -> Result<T>,
    {
        self.as_ref().run(body)
    }
}

impl<H: SyncTransaction> SyncTransaction for &H {
    fn run<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&mut dyn ModifiableModels) -> Result<T>,
    {
        (**self).run(body)
    }
}
