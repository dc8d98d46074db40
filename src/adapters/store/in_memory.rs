//! In-memory run store adapter.
//!
//! Stores runs, answer batches and results in memory. Stands in for the
//! backing API in tests and the demo binary.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RunId, UserId};
use crate::domain::run::{AnswerSnapshot, AssessmentRun};
use crate::domain::scoring::AssessmentResult;
use crate::ports::{AnswerSink, RunStore};

/// In-memory storage for runs and results.
#[derive(Clone, Default)]
pub struct InMemoryRunStore {
    runs: Arc<RwLock<HashMap<RunId, AssessmentRun>>>,
    batches: Arc<RwLock<HashMap<RunId, AnswerSnapshot>>>,
    results: Arc<RwLock<HashMap<RunId, AssessmentResult>>>,
    save_calls: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryRunStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `save_answers` calls fail (test hook).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of `save_answers` calls observed.
    pub fn save_call_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    /// Number of stored runs.
    pub async fn run_count(&self) -> usize {
        self.runs.read().await.len()
    }

    /// Returns the last saved answer batch for a run.
    pub async fn last_batch(&self, run_id: &RunId) -> Option<AnswerSnapshot> {
        self.batches.read().await.get(run_id).cloned()
    }

    /// Clears all stored data (useful for tests).
    pub async fn clear(&self) {
        self.runs.write().await.clear();
        self.batches.write().await.clear();
        self.results.write().await.clear();
        self.save_calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl AnswerSink for InMemoryRunStore {
    async fn save_answers(
        &self,
        run_id: &RunId,
        answers: &AnswerSnapshot,
    ) -> Result<(), DomainError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::SaveFailed,
                "simulated save failure",
            ));
        }
        let mut batches = self.batches.write().await;
        batches.insert(*run_id, answers.clone());
        Ok(())
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn create_run(&self, run: &AssessmentRun) -> Result<(), DomainError> {
        let mut runs = self.runs.write().await;
        runs.insert(*run.id(), run.clone());
        Ok(())
    }

    async fn update_run(&self, run: &AssessmentRun) -> Result<(), DomainError> {
        let mut runs = self.runs.write().await;
        if !runs.contains_key(run.id()) {
            return Err(DomainError::new(
                ErrorCode::RunNotFound,
                format!("Run {} not found", run.id()),
            ));
        }
        runs.insert(*run.id(), run.clone());
        Ok(())
    }

    async fn find_run(&self, id: &RunId) -> Result<Option<AssessmentRun>, DomainError> {
        let runs = self.runs.read().await;
        Ok(runs.get(id).cloned())
    }

    async fn latest_run_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentRun>, DomainError> {
        let runs = self.runs.read().await;
        Ok(runs
            .values()
            .filter(|r| r.user_id() == user_id)
            .max_by_key(|r| *r.started_at())
            .cloned())
    }

    async fn record_result(
        &self,
        run_id: &RunId,
        result: &AssessmentResult,
    ) -> Result<(), DomainError> {
        if !self.runs.read().await.contains_key(run_id) {
            return Err(DomainError::new(
                ErrorCode::RunNotFound,
                format!("Run {} not found", run_id),
            ));
        }
        let mut results = self.results.write().await;
        results.insert(*run_id, result.clone());
        Ok(())
    }

    async fn find_result(
        &self,
        run_id: &RunId,
    ) -> Result<Option<AssessmentResult>, DomainError> {
        let results = self.results.read().await;
        Ok(results.get(run_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn run_for(user: &str, started_secs: u64) -> AssessmentRun {
        AssessmentRun::new(
            RunId::new(),
            UserId::new(user).unwrap(),
            Timestamp::from_unix_secs(started_secs),
        )
    }

    #[tokio::test]
    async fn create_and_find_roundtrips() {
        let store = InMemoryRunStore::new();
        let run = run_for("org-1", 1_000);

        store.create_run(&run).await.unwrap();
        let found = store.find_run(run.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), run.id());
        assert_eq!(store.run_count().await, 1);
    }

    #[tokio::test]
    async fn find_missing_run_returns_none() {
        let store = InMemoryRunStore::new();
        assert!(store.find_run(&RunId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_run_fails() {
        let store = InMemoryRunStore::new();
        let run = run_for("org-1", 1_000);
        let result = store.update_run(&run).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn latest_run_picks_most_recent_for_user() {
        let store = InMemoryRunStore::new();
        let old = run_for("org-1", 1_000);
        let new = run_for("org-1", 2_000);
        let other = run_for("org-2", 3_000);
        store.create_run(&old).await.unwrap();
        store.create_run(&new).await.unwrap();
        store.create_run(&other).await.unwrap();

        let latest = store
            .latest_run_for(&UserId::new("org-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id(), new.id());
    }

    #[tokio::test]
    async fn save_answers_records_batch_and_counts_calls() {
        let store = InMemoryRunStore::new();
        let run_id = RunId::new();

        store
            .save_answers(&run_id, &AnswerSnapshot::default())
            .await
            .unwrap();
        assert_eq!(store.save_call_count(), 1);
        assert!(store.last_batch(&run_id).await.is_some());
    }

    #[tokio::test]
    async fn failing_saves_return_save_failed() {
        let store = InMemoryRunStore::new();
        store.fail_saves(true);

        let result = store
            .save_answers(&RunId::new(), &AnswerSnapshot::default())
            .await;
        assert!(matches!(
            result,
            Err(DomainError {
                code: ErrorCode::SaveFailed,
                ..
            })
        ));
        assert_eq!(store.save_call_count(), 1);
    }

    #[tokio::test]
    async fn record_result_requires_existing_run() {
        let store = InMemoryRunStore::new();
        let run = run_for("org-1", 1_000);
        store.create_run(&run).await.unwrap();

        let result = AssessmentResult {
            run_id: *run.id(),
            computed_at: Timestamp::from_unix_secs(1_100),
            sections: vec![],
            overall: crate::domain::foundation::Score::new(50.0),
            eligible: true,
            instrument: "Mezzanine Financing".to_string(),
        };
        store.record_result(run.id(), &result).await.unwrap();
        assert!(store.find_result(run.id()).await.unwrap().is_some());

        let orphan = store.record_result(&RunId::new(), &result).await;
        assert!(orphan.is_err());
    }
}
