//! RecordAnswerHandler - Command handler for answer edits.
//!
//! The write path of the editing loop: validate against the catalog,
//! update the run's Answer Store, stage the new snapshot with autosave,
//! and hand back recomputed progress for the UI.

use std::sync::Arc;

use tracing::debug;

use crate::application::Autosave;
use crate::domain::catalog::Catalog;
use crate::domain::foundation::QuestionCode;
use crate::domain::progress::ProgressReport;
use crate::domain::run::{AnswerValue, AssessmentRun, RunError};
use crate::ports::Clock;

/// Command carrying one answer edit.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub question: QuestionCode,
    pub value: AnswerValue,
}

/// Handler for recording answers.
pub struct RecordAnswerHandler {
    catalog: Arc<Catalog>,
    autosave: Arc<Autosave>,
    clock: Arc<dyn Clock>,
}

impl RecordAnswerHandler {
    pub fn new(catalog: Arc<Catalog>, autosave: Arc<Autosave>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            autosave,
            clock,
        }
    }

    /// Applies one edit to the active run.
    ///
    /// Edits apply strictly in call order; the staged autosave payload is
    /// always the snapshot taken after this edit.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` for a code absent from the catalog
    /// - `TypeMismatch` if the value does not fit the question; nothing is
    ///   stored or staged in that case
    /// - `NotDraft` once the run is submitted
    pub fn handle(
        &self,
        run: &mut AssessmentRun,
        cmd: RecordAnswerCommand,
    ) -> Result<ProgressReport, RunError> {
        let (_, question) = self
            .catalog
            .question(&cmd.question)
            .ok_or_else(|| RunError::QuestionNotFound(cmd.question.clone()))?;

        run.set_answer(question, cmd.value, self.clock.now())?;

        let snapshot = run.snapshot();
        self.autosave.schedule(*run.id(), snapshot.clone());
        debug!(run_id = %run.id(), question = %cmd.question, "answer recorded");

        Ok(ProgressReport::compute(&self.catalog, &snapshot))
    }
}
