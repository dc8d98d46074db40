//! Engine policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scoring::ScoringPolicy;

/// Engine policy knobs: scoring threshold, cooldown, debounce window.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Inclusive overall score required for eligibility
    #[serde(default = "default_eligibility_threshold")]
    pub eligibility_threshold: f64,

    /// Days a user must wait after submitting before starting a new run
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: u32,

    /// Quiet window for autosave batching, in milliseconds
    #[serde(default = "default_autosave_window_ms")]
    pub autosave_window_ms: u64,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl EngineConfig {
    /// The cooldown window in seconds.
    pub fn cooldown_secs(&self) -> u64 {
        u64::from(self.cooldown_days) * 24 * 60 * 60
    }

    /// The scoring policy derived from this configuration.
    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            eligibility_threshold: self.eligibility_threshold,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.eligibility_threshold.is_finite()
            || !(0.0..=100.0).contains(&self.eligibility_threshold)
        {
            return Err(ValidationError::InvalidEligibilityThreshold);
        }
        if self.autosave_window_ms == 0 || self.autosave_window_ms > 60_000 {
            return Err(ValidationError::InvalidAutosaveWindow);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eligibility_threshold: default_eligibility_threshold(),
            cooldown_days: default_cooldown_days(),
            autosave_window_ms: default_autosave_window_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_eligibility_threshold() -> f64 {
    10.0
}

fn default_cooldown_days() -> u32 {
    30
}

fn default_autosave_window_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info,impact_compass=debug".to_string()
}
