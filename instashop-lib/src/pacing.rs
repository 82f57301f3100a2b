//! Paced, single-flight field generation.
//!
//! Field generation itself is synchronous; the pacer only delays the
//! "generation complete" signal so a frontend can show progress. At most one
//! completion is in flight: a new request aborts the pending one, and the
//! session ignores the superseded ticket even if its task already ran.

use std::sync::Arc;
use std::time::Duration;

use instashop_catalog::{GenerationTicket, Session};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::LibError;

pub struct GenerationPacer {
    session: Arc<Mutex<Session>>,
    delay: Duration,
    pending: Option<JoinHandle<bool>>,
}

impl GenerationPacer {
    pub fn new(session: Arc<Mutex<Session>>, delay: Duration) -> Self {
        Self {
            session,
            delay,
            pending: None,
        }
    }

    pub fn session(&self) -> &Arc<Mutex<Session>> {
        &self.session
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a generation, superseding any pending one.
    ///
    /// The ledger is built before this returns; completion is reported after
    /// the pacing delay. Must be called within a tokio runtime.
    pub async fn request(&mut self) -> Result<GenerationTicket, LibError> {
        let ticket = self.session.lock().await.begin_generation()?;

        if let Some(prev) = self.pending.take() {
            prev.abort();
            log::debug!("pacer: aborted pending completion");
        }

        let session = Arc::clone(&self.session);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.lock().await.complete_generation(ticket)
        }));

        log::debug!(
            "pacer: generation {} scheduled ({} ms)",
            ticket.id(),
            delay.as_millis()
        );
        Ok(ticket)
    }

    /// Wait for the pending completion.
    ///
    /// Returns `true` if it moved the session to `Editing`, `false` if there
    /// was nothing pending, it was cancelled, or the ticket went stale.
    pub async fn wait(&mut self) -> Result<bool, LibError> {
        let Some(handle) = self.pending.take() else {
            return Ok(false);
        };
        match handle.await {
            Ok(completed) => Ok(completed),
            Err(e) if e.is_cancelled() => Ok(false),
            Err(e) => Err(LibError::Task(e.to_string())),
        }
    }

    /// Abort the pending completion. The session stays `Generating` until
    /// another request or a restart.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for GenerationPacer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/pacing_tests.rs"]
mod tests;
