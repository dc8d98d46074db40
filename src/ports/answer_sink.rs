//! Answer sink port - the narrow write path used by autosave.
//!
//! The debounced persistence component only ever saves answer batches, so
//! it depends on this slice of the backing store rather than the full
//! `RunStore` contract.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RunId};
use crate::domain::run::AnswerSnapshot;

/// Write path for answer batches.
#[async_trait]
pub trait AnswerSink: Send + Sync {
    /// Persists a full answer snapshot for a run.
    ///
    /// The payload is always a whole snapshot taken at schedule time,
    /// never an incremental diff.
    ///
    /// # Errors
    ///
    /// - `SaveFailed` on persistence failure; the caller surfaces the
    ///   error and may retry by re-scheduling
    async fn save_answers(
        &self,
        run_id: &RunId,
        answers: &AnswerSnapshot,
    ) -> Result<(), DomainError>;
}
