//! Configuration error types

use thiserror::Error;

use crate::domain::catalog::CatalogError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Catalog file '{path}' could not be read: {reason}")]
    CatalogUnreadable { path: String, reason: String },

    #[error("Catalog file '{path}' could not be parsed: {reason}")]
    CatalogUnparsable { path: String, reason: String },

    #[error("Catalog is invalid: {0}")]
    CatalogInvalid(#[from] CatalogError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Eligibility threshold must be between 0 and 100")]
    InvalidEligibilityThreshold,

    #[error("Autosave window must be between 1ms and 60s")]
    InvalidAutosaveWindow,

    #[error("Catalog path cannot be empty")]
    EmptyCatalogPath,

    #[error("Unsupported catalog format (expected .yaml, .yml or .json)")]
    UnsupportedCatalogFormat,
}
