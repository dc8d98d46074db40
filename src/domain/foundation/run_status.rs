//! RunStatus enum for tracking the lifecycle of an assessment run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of an assessment run.
///
/// A run starts as a draft, becomes submitted once every required reachable
/// question is answered, and enters cooldown once its result is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Draft,
    Submitted,
    Cooldown,
}

impl RunStatus {
    /// Returns true if answers can still be edited.
    pub fn is_mutable(&self) -> bool {
        matches!(self, RunStatus::Draft)
    }

    /// Returns true if the run has been submitted (scored or awaiting scoring).
    pub fn is_submitted(&self) -> bool {
        matches!(self, RunStatus::Submitted | RunStatus::Cooldown)
    }
}

impl StateMachine for RunStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RunStatus::*;
        matches!((self, target), (Draft, Submitted) | (Submitted, Cooldown))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RunStatus::*;
        match self {
            Draft => vec![Submitted],
            Submitted => vec![Cooldown],
            Cooldown => vec![],
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Draft => "Draft",
            RunStatus::Submitted => "Submitted",
            RunStatus::Cooldown => "Cooldown",
        };
        write!(f, "{}", s)
    }
}
