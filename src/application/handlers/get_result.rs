//! GetResultHandler - Query handler for recorded results.

use std::sync::Arc;

use crate::domain::foundation::RunId;
use crate::domain::run::RunError;
use crate::domain::scoring::AssessmentResult;
use crate::ports::RunStore;

/// Handler returning the immutable result of a submitted run.
pub struct GetResultHandler {
    store: Arc<dyn RunStore>,
}

impl GetResultHandler {
    pub fn new(store: Arc<dyn RunStore>) -> Self {
        Self { store }
    }

    /// Fetches the recorded result.
    ///
    /// # Errors
    ///
    /// - `ResultNotFound` if the run was never scored
    pub async fn handle(&self, run_id: &RunId) -> Result<AssessmentResult, RunError> {
        self.store
            .find_result(run_id)
            .await?
            .ok_or(RunError::ResultNotFound(*run_id))
    }
}
