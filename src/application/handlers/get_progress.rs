//! GetProgressHandler - Query handler for run progress.

use std::sync::Arc;

use crate::domain::catalog::Catalog;
use crate::domain::progress::ProgressReport;
use crate::domain::foundation::RunId;
use crate::domain::run::RunError;
use crate::ports::RunStore;

/// Handler recomputing progress for a stored run.
pub struct GetProgressHandler {
    catalog: Arc<Catalog>,
    store: Arc<dyn RunStore>,
}

impl GetProgressHandler {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn RunStore>) -> Self {
        Self { catalog, store }
    }

    /// Loads the run and derives its progress report.
    ///
    /// # Errors
    ///
    /// - `RunNotFound` if the run does not exist
    pub async fn handle(&self, run_id: &RunId) -> Result<ProgressReport, RunError> {
        let run = self
            .store
            .find_run(run_id)
            .await?
            .ok_or(RunError::RunNotFound(*run_id))?;

        Ok(ProgressReport::compute(&self.catalog, &run.snapshot()))
    }
}
