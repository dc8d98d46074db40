//! Run store port - persistence contract for runs and results.
//!
//! Defines how assessment runs and their computed results are stored and
//! retrieved. Implementations handle the actual backing store; the engine
//! only sees this contract.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RunId, UserId};
use crate::domain::run::AssessmentRun;
use crate::domain::scoring::AssessmentResult;

use super::AnswerSink;

/// Repository port for run lifecycle persistence.
///
/// Extends [`AnswerSink`] so the autosave component can share the same
/// adapter instance.
#[async_trait]
pub trait RunStore: AnswerSink {
    /// Persists a newly started run.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn create_run(&self, run: &AssessmentRun) -> Result<(), DomainError>;

    /// Persists lifecycle changes to an existing run.
    ///
    /// # Errors
    ///
    /// - `RunNotFound` if the run was never created
    /// - `StorageError` on persistence failure
    async fn update_run(&self, run: &AssessmentRun) -> Result<(), DomainError>;

    /// Finds a run by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_run(&self, id: &RunId) -> Result<Option<AssessmentRun>, DomainError>;

    /// Returns the user's most recently started run, if any.
    ///
    /// Used for the cooldown gate when starting a new run.
    async fn latest_run_for(&self, user_id: &UserId)
        -> Result<Option<AssessmentRun>, DomainError>;

    /// Records the immutable result computed for a submitted run.
    ///
    /// # Errors
    ///
    /// - `RunNotFound` if the run was never created
    /// - `StorageError` on persistence failure
    async fn record_result(
        &self,
        run_id: &RunId,
        result: &AssessmentResult,
    ) -> Result<(), DomainError>;

    /// Returns the recorded result for a run, if one exists.
    async fn find_result(&self, run_id: &RunId)
        -> Result<Option<AssessmentResult>, DomainError>;
}
