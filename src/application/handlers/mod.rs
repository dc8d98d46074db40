//! Application command and query handlers.
//!
//! Handlers wire the domain to the ports in the editing loop:
//! start a run, record answers (staging autosave batches), submit and
//! score, and read progress/results back.

mod get_progress;
mod get_result;
mod record_answer;
mod start_run;
mod submit_run;

pub use get_progress::GetProgressHandler;
pub use get_result::GetResultHandler;
pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler};
pub use start_run::{StartRunCommand, StartRunHandler};
pub use submit_run::SubmitRunHandler;
