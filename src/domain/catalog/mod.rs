//! Catalog module - the admin-authored question/section/condition model.
//!
//! The catalog is read-only input supplied by the configuration source and
//! validated once at load. Runtime components (branching, progress,
//! scoring) treat a constructed [`Catalog`] as trusted.

#[allow(clippy::module_inception)]
mod catalog;
mod condition;
mod errors;
mod question;
mod section;

pub use catalog::Catalog;
pub use condition::{Condition, ConditionOperator};
pub use errors::CatalogError;
pub use question::{ChoiceOption, Question, QuestionPayload, QuestionType, SliderDimension};
pub use section::{Section, FEEDBACK, IMPACT, RETURN, RISK, SECTOR_MATURITY};
