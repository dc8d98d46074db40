//! Score value object (0-100 scale, fractional).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalized score between 0.0 and 100.0 inclusive.
///
/// Section and overall scores carry fractional precision because
/// eligibility is decided on an inclusive threshold (9.99 is below 10.0).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// The zero score.
    pub const ZERO: Self = Self(0.0);

    /// The maximum score.
    pub const MAX: Self = Self(100.0);

    /// Creates a new Score, clamping to the valid range.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Score, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if this score meets the given inclusive threshold.
    pub fn meets(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
