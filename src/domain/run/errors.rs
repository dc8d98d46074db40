//! Run-context errors.
//!
//! Runtime failures are typed and recoverable: they are returned to the
//! caller as values, never thrown into presentation code. Every variant
//! that implicates configuration names the question codes involved so the
//! UI can route the user back.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionCode, RunId};

/// Errors surfaced while operating on an assessment run.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    #[error("Answer for '{question}' does not match its {expected} shape: {reason}")]
    TypeMismatch {
        question: QuestionCode,
        expected: String,
        reason: String,
    },

    #[error("Submission incomplete: {} required question(s) unanswered", missing.len())]
    IncompleteSubmission { missing: Vec<QuestionCode> },

    #[error("Saving answers failed: {reason}")]
    SaveFailed { reason: String },

    #[error("A new run cannot start for another {retry_after_secs}s")]
    CooldownActive { retry_after_secs: u64 },

    #[error("Unknown question code '{0}'")]
    QuestionNotFound(QuestionCode),

    #[error("Run {0} not found")]
    RunNotFound(RunId),

    #[error("No result recorded for run {0}")]
    ResultNotFound(RunId),

    #[error("Run {run_id} is {status}, expected a draft")]
    NotDraft { run_id: RunId, status: String },

    #[error("Run {run_id} is {status}, expected submitted")]
    NotSubmitted { run_id: RunId, status: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RunError {
    /// Maps this error onto the shared error-code taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            RunError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            RunError::IncompleteSubmission { .. } => ErrorCode::IncompleteSubmission,
            RunError::SaveFailed { .. } => ErrorCode::SaveFailed,
            RunError::CooldownActive { .. } => ErrorCode::CooldownActive,
            RunError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            RunError::RunNotFound(_) => ErrorCode::RunNotFound,
            RunError::ResultNotFound(_) => ErrorCode::ResultNotFound,
            RunError::NotDraft { .. } => ErrorCode::RunNotDraft,
            RunError::NotSubmitted { .. } => ErrorCode::RunNotSubmitted,
            RunError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for RunError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SaveFailed => RunError::SaveFailed {
                reason: err.message,
            },
            _ => RunError::Storage(err.to_string()),
        }
    }
}
