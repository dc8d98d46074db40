//! Run module - the assessment run aggregate and its Answer Store.

mod aggregate;
mod answers;
mod errors;

pub use aggregate::AssessmentRun;
pub use answers::{AnswerSnapshot, AnswerStore, AnswerValue};
pub use errors::RunError;
