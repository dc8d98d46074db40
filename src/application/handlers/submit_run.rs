//! SubmitRunHandler - Command handler for submitting a run.
//!
//! Submission sequence: completeness gate, flush of pending edits, run
//! transition, scoring, persistence, cooldown. An incomplete run fails
//! before any backing-store call is made.

use std::sync::Arc;

use tracing::info;

use crate::application::Autosave;
use crate::domain::branching;
use crate::domain::catalog::Catalog;
use crate::domain::run::{AssessmentRun, RunError};
use crate::domain::scoring::{score_run, AssessmentResult, ScoringPolicy};
use crate::ports::{Clock, RunStore};

/// Handler for submitting runs and recording their results.
pub struct SubmitRunHandler {
    catalog: Arc<Catalog>,
    store: Arc<dyn RunStore>,
    autosave: Arc<Autosave>,
    clock: Arc<dyn Clock>,
    policy: ScoringPolicy,
    cooldown_secs: u64,
}

impl SubmitRunHandler {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn RunStore>,
        autosave: Arc<Autosave>,
        clock: Arc<dyn Clock>,
        policy: ScoringPolicy,
        cooldown_secs: u64,
    ) -> Self {
        Self {
            catalog,
            store,
            autosave,
            clock,
            policy,
            cooldown_secs,
        }
    }

    /// Submits the run and returns its computed result.
    ///
    /// Pending edits are flushed and awaited before the submit itself, so
    /// the backing store always scores against the final snapshot.
    ///
    /// # Errors
    ///
    /// - `IncompleteSubmission` naming the missing question codes; the
    ///   backing store is not called in this case
    /// - `SaveFailed` if the pre-submit flush fails; the run stays a draft
    /// - `NotDraft` if the run was already submitted
    pub async fn handle(&self, run: &mut AssessmentRun) -> Result<AssessmentResult, RunError> {
        // Completeness gate before any network traffic.
        let missing = branching::missing_required(&self.catalog, &run.snapshot());
        if !missing.is_empty() {
            return Err(RunError::IncompleteSubmission { missing });
        }

        self.autosave
            .flush_now(*run.id(), run.snapshot())
            .await?;
        run.mark_saved();

        run.submit(&self.catalog, self.clock.now(), self.cooldown_secs)?;
        self.store.update_run(run).await?;

        let result = score_run(
            &self.catalog,
            &run.snapshot(),
            &self.policy,
            *run.id(),
            self.clock.now(),
        )?;
        self.store.record_result(run.id(), &result).await?;

        run.begin_cooldown(self.clock.now())?;
        self.store.update_run(run).await?;

        info!(
            run_id = %run.id(),
            overall = %result.overall,
            eligible = result.eligible,
            instrument = %result.instrument,
            "assessment run submitted and scored"
        );
        Ok(result)
    }
}
