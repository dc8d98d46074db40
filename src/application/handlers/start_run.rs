//! StartRunHandler - Command handler for starting assessment runs.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{RunId, UserId};
use crate::domain::run::{AssessmentRun, RunError};
use crate::ports::{Clock, RunStore};

/// Command to start a new run.
#[derive(Debug, Clone)]
pub struct StartRunCommand {
    pub user_id: UserId,
}

/// Handler for starting runs, gated on the cooldown window.
pub struct StartRunHandler {
    store: Arc<dyn RunStore>,
    clock: Arc<dyn Clock>,
}

impl StartRunHandler {
    pub fn new(store: Arc<dyn RunStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Starts a new draft run for the user.
    ///
    /// # Errors
    ///
    /// - `CooldownActive` with the remaining seconds while the user's
    ///   latest run is still cooling down
    /// - `Storage` on persistence failure
    pub async fn handle(&self, cmd: StartRunCommand) -> Result<AssessmentRun, RunError> {
        let now = self.clock.now();

        if let Some(latest) = self.store.latest_run_for(&cmd.user_id).await? {
            if let Some(retry_after_secs) = latest.cooldown_remaining(now) {
                return Err(RunError::CooldownActive { retry_after_secs });
            }
        }

        let run = AssessmentRun::new(RunId::new(), cmd.user_id, now);
        self.store.create_run(&run).await?;

        info!(run_id = %run.id(), user_id = %run.user_id(), "assessment run started");
        Ok(run)
    }
}
