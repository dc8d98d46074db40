//! AssessmentRun aggregate entity.
//!
//! A run is one user's pass through the assessment, from start to
//! submission and cooldown. It owns its Answer Store exclusively; no two
//! runs ever share one.
//!
//! Time is always passed in by the caller so lifecycle rules (cooldown,
//! submission stamps) stay deterministic under test clocks.

use serde::{Deserialize, Serialize};

use crate::domain::branching;
use crate::domain::catalog::{Catalog, Question};
use crate::domain::foundation::{RunId, RunStatus, StateMachine, Timestamp, UserId};

use super::{AnswerSnapshot, AnswerStore, AnswerValue, RunError};

/// One instance of a user taking the assessment.
///
/// # Invariants
///
/// - answers are only editable while status is `Draft`
/// - `Draft -> Submitted` requires every required reachable question to
///   have a non-empty answer
/// - `submitted_at` and `cooldown_until` are set exactly once, at
///   submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRun {
    /// Unique identifier for this run.
    id: RunId,

    /// User taking the assessment.
    user_id: UserId,

    /// Current lifecycle status.
    status: RunStatus,

    /// When the run was started.
    started_at: Timestamp,

    /// When the run was submitted, if it has been.
    submitted_at: Option<Timestamp>,

    /// End of the window during which no new run may start.
    cooldown_until: Option<Timestamp>,

    /// When the run was last changed.
    updated_at: Timestamp,

    /// Answers keyed by question code; owned by this run.
    answers: AnswerStore,
}

impl AssessmentRun {
    /// Starts a new draft run.
    pub fn new(id: RunId, user_id: UserId, now: Timestamp) -> Self {
        Self {
            id,
            user_id,
            status: RunStatus::Draft,
            started_at: now,
            submitted_at: None,
            cooldown_until: None,
            updated_at: now,
            answers: AnswerStore::new(),
        }
    }

    /// Reconstitute a run from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RunId,
        user_id: UserId,
        status: RunStatus,
        started_at: Timestamp,
        submitted_at: Option<Timestamp>,
        cooldown_until: Option<Timestamp>,
        updated_at: Timestamp,
        answers: AnswerStore,
    ) -> Self {
        Self {
            id,
            user_id,
            status,
            started_at,
            submitted_at,
            cooldown_until,
            updated_at,
            answers,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the run ID.
    pub fn id(&self) -> &RunId {
        &self.id
    }

    /// Returns the user taking this run.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the current status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns when the run started.
    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// Returns when the run was submitted, if it has been.
    pub fn submitted_at(&self) -> Option<&Timestamp> {
        self.submitted_at.as_ref()
    }

    /// Returns the end of the cooldown window, if set.
    pub fn cooldown_until(&self) -> Option<&Timestamp> {
        self.cooldown_until.as_ref()
    }

    /// Returns when the run was last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns an immutable snapshot of the current answers.
    pub fn snapshot(&self) -> AnswerSnapshot {
        self.answers.snapshot()
    }

    /// Returns true if edits have not been persisted yet.
    pub fn has_unsaved_edits(&self) -> bool {
        self.answers.is_dirty()
    }

    /// Drains the dirty set after a successful save.
    pub fn mark_saved(&mut self) {
        let _ = self.answers.take_dirty();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records an answer, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `NotDraft` if the run is no longer editable
    /// - `TypeMismatch` if the value does not fit the question's shape
    pub fn set_answer(
        &mut self,
        question: &Question,
        value: AnswerValue,
        now: Timestamp,
    ) -> Result<Option<AnswerValue>, RunError> {
        self.ensure_draft()?;
        let previous = self.answers.set(question, value)?;
        self.updated_at = now;
        Ok(previous)
    }

    /// Clears all answers (run reset).
    ///
    /// # Errors
    ///
    /// - `NotDraft` if the run is no longer editable
    pub fn reset(&mut self, now: Timestamp) -> Result<(), RunError> {
        self.ensure_draft()?;
        self.answers.clear();
        self.updated_at = now;
        Ok(())
    }

    /// Submits the run, gating on completeness.
    ///
    /// The completeness check runs here, before any call to the backing
    /// store, so an incomplete run never produces a submit request.
    ///
    /// # Errors
    ///
    /// - `NotDraft` if already submitted
    /// - `IncompleteSubmission` naming every required reachable question
    ///   that lacks a non-empty answer
    pub fn submit(
        &mut self,
        catalog: &Catalog,
        now: Timestamp,
        cooldown_secs: u64,
    ) -> Result<(), RunError> {
        self.ensure_draft()?;

        let missing = branching::missing_required(catalog, &self.answers.snapshot());
        if !missing.is_empty() {
            return Err(RunError::IncompleteSubmission { missing });
        }

        self.status = self
            .status
            .transition_to(RunStatus::Submitted)
            .map_err(|_| self.not_draft())?;
        self.submitted_at = Some(now);
        self.cooldown_until = Some(now.plus_secs(cooldown_secs));
        self.updated_at = now;
        Ok(())
    }

    /// Moves a submitted run into cooldown once its result is recorded.
    ///
    /// # Errors
    ///
    /// - `NotSubmitted` if the run was never submitted
    pub fn begin_cooldown(&mut self, now: Timestamp) -> Result<(), RunError> {
        self.status =
            self.status
                .transition_to(RunStatus::Cooldown)
                .map_err(|_| RunError::NotSubmitted {
                    run_id: self.id,
                    status: self.status.to_string(),
                })?;
        self.updated_at = now;
        Ok(())
    }

    /// Seconds left before a new run may start, if the cooldown window is
    /// still open at `now`.
    pub fn cooldown_remaining(&self, now: Timestamp) -> Option<u64> {
        let until = self.cooldown_until?;
        if until.is_after(&now) {
            Some(until.duration_since(&now).num_seconds().max(0) as u64)
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_draft(&self) -> Result<(), RunError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(self.not_draft())
        }
    }

    fn not_draft(&self) -> RunError {
        RunError::NotDraft {
            run_id: self.id,
            status: self.status.to_string(),
        }
    }
}
