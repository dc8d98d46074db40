//! Catalog file configuration and loading.
//!
//! The admin-authored catalog is a YAML or JSON document listing sections,
//! questions and conditions. It is parsed into the raw section model and
//! then run through [`Catalog::new`], so every structural invariant is
//! checked before the engine starts.

use std::path::Path;

use serde::Deserialize;

use super::error::{ConfigError, ValidationError};
use crate::domain::catalog::{Catalog, Section};

/// Catalog source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path of the catalog document
    #[serde(default = "default_path")]
    pub path: String,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.trim().is_empty() {
            return Err(ValidationError::EmptyCatalogPath);
        }
        match Path::new(&self.path).extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml" | "json") => Ok(()),
            _ => Err(ValidationError::UnsupportedCatalogFormat),
        }
    }

    /// Loads and validates the catalog document.
    ///
    /// # Errors
    ///
    /// - `CatalogUnreadable` / `CatalogUnparsable` on IO or syntax errors
    /// - `CatalogInvalid` when a structural invariant fails
    pub fn load(&self) -> Result<Catalog, ConfigError> {
        self.validate().map_err(ConfigError::ValidationFailed)?;

        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            ConfigError::CatalogUnreadable {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let sections = parse_sections(&self.path, &raw)?;
        Ok(Catalog::new(sections)?)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "catalog.yaml".to_string()
}

fn parse_sections(path: &str, raw: &str) -> Result<Vec<Section>, ConfigError> {
    let unparsable = |reason: String| ConfigError::CatalogUnparsable {
        path: path.to_string(),
        reason,
    };

    if Path::new(path).extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(raw).map_err(|e| unparsable(e.to_string()))
    } else {
        serde_yaml::from_str(raw).map_err(|e| unparsable(e.to_string()))
    }
}
