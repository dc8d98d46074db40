//! Debounced answer persistence.
//!
//! Coalesces rapid local edits into one batched save after a quiet period,
//! with an immediate flush for navigation and submit paths. The timer is
//! cooperative: the component tracks a single pending deadline and the
//! host event loop calls [`Autosave::fire_due`] to let it elapse, so unit
//! tests drive time through the injected [`Clock`] instead of sleeping.
//!
//! # Guarantees
//!
//! - one pending payload at most, cancel-and-replace on every `schedule`
//! - at most one save in flight (serialized by an async send gate); a
//!   `schedule` during an in-flight send never cancels the send, it only
//!   stages the next payload
//! - failed saves are surfaced, not retried; `shutdown` clears pending
//!   state so nothing fires after teardown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::domain::foundation::{RunId, Timestamp};
use crate::domain::run::{AnswerSnapshot, RunError};
use crate::ports::{AnswerSink, Clock};

/// Default quiet window before a scheduled batch is saved.
pub const DEFAULT_WINDOW_MS: u64 = 500;

#[derive(Debug, Clone)]
struct PendingSave {
    run_id: RunId,
    answers: AnswerSnapshot,
    due_at: Timestamp,
}

/// Debounced persistence component.
pub struct Autosave {
    sink: Arc<dyn AnswerSink>,
    clock: Arc<dyn Clock>,
    window_ms: u64,
    pending: Mutex<Option<PendingSave>>,
    send_gate: tokio::sync::Mutex<()>,
    shut_down: AtomicBool,
}

impl Autosave {
    /// Creates a component with the given quiet window.
    pub fn new(sink: Arc<dyn AnswerSink>, clock: Arc<dyn Clock>, window_ms: u64) -> Self {
        Self {
            sink,
            clock,
            window_ms,
            pending: Mutex::new(None),
            send_gate: tokio::sync::Mutex::new(()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Creates a component with the default 500ms window.
    pub fn with_default_window(sink: Arc<dyn AnswerSink>, clock: Arc<dyn Clock>) -> Self {
        Self::new(sink, clock, DEFAULT_WINDOW_MS)
    }

    /// Stages the latest answer batch for a run, resetting the deadline.
    ///
    /// Cancel-and-replace: any previously pending payload (for any run) is
    /// discarded in favor of this one, so the eventual save always carries
    /// the newest snapshot. An in-flight send is unaffected.
    pub fn schedule(&self, run_id: RunId, answers: AnswerSnapshot) {
        if self.shut_down.load(Ordering::SeqCst) {
            return;
        }
        let due_at = self.clock.now().plus_millis(self.window_ms);
        let mut pending = self.pending.lock().unwrap();
        *pending = Some(PendingSave {
            run_id,
            answers,
            due_at,
        });
        debug!(run_id = %run_id, window_ms = self.window_ms, "autosave scheduled");
    }

    /// Sends the pending payload if its quiet window has elapsed.
    ///
    /// Returns `Ok(true)` when a save was issued. The host calls this from
    /// its event loop; it is a no-op while nothing is due.
    ///
    /// # Errors
    ///
    /// - `SaveFailed` if the sink rejects the batch; the payload is not
    ///   re-queued
    pub async fn fire_due(&self) -> Result<bool, RunError> {
        let now = self.clock.now();
        let due = {
            let mut pending = self.pending.lock().unwrap();
            match &*pending {
                Some(p) if !p.due_at.is_after(&now) => pending.take(),
                _ => None,
            }
        };

        match due {
            Some(p) => {
                self.send(p).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Cancels the pending deadline and saves the given snapshot now.
    ///
    /// Used before section transitions, navigation away, and submit; the
    /// caller passes the latest snapshot so nothing staged is lost.
    ///
    /// # Errors
    ///
    /// - `SaveFailed` if the sink rejects the batch
    pub async fn flush_now(
        &self,
        run_id: RunId,
        answers: AnswerSnapshot,
    ) -> Result<(), RunError> {
        {
            let mut pending = self.pending.lock().unwrap();
            if pending.as_ref().is_some_and(|p| p.run_id == run_id) {
                *pending = None;
            }
        }
        self.send(PendingSave {
            run_id,
            answers,
            due_at: self.clock.now(),
        })
        .await
    }

    /// Returns the deadline of the pending payload, if any.
    pub fn next_due(&self) -> Option<Timestamp> {
        self.pending.lock().unwrap().as_ref().map(|p| p.due_at)
    }

    /// Returns true if a payload is staged.
    pub fn has_pending(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }

    /// Clears pending state; later schedules are ignored.
    ///
    /// Called on consumer teardown so no save fires into a component whose
    /// owner is gone. An in-flight send still runs to completion; sends
    /// are not abortable once issued.
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        let mut pending = self.pending.lock().unwrap();
        *pending = None;
    }

    async fn send(&self, save: PendingSave) -> Result<(), RunError> {
        // Serializes sends: a second save awaits the first instead of
        // overlapping it.
        let _gate = self.send_gate.lock().await;
        match self.sink.save_answers(&save.run_id, &save.answers).await {
            Ok(()) => {
                debug!(run_id = %save.run_id, answers = save.answers.len(), "answers saved");
                Ok(())
            }
            Err(err) => {
                warn!(run_id = %save.run_id, error = %err, "answer save failed");
                Err(RunError::SaveFailed {
                    reason: err.to_string(),
                })
            }
        }
    }
}
