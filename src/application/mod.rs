//! Application layer - use-case orchestration over the domain and ports.

mod autosave;
pub mod handlers;

pub use autosave::{Autosave, DEFAULT_WINDOW_MS};
