//! Catalog check entry point.
//!
//! Loads configuration and the catalog document, runs full validation and
//! logs a summary. Exits non-zero when the configuration would prevent the
//! engine from starting, so deployments can gate on it.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use impact_compass::config::AppConfig;

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.engine.log_level.clone())),
        )
        .init();

    if let Err(err) = config.validate() {
        error!(error = %err, "configuration validation failed");
        std::process::exit(1);
    }

    let catalog = match config.catalog.load() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, path = %config.catalog.path, "catalog rejected");
            std::process::exit(1);
        }
    };

    for section in catalog.sections() {
        info!(
            section = %section.code,
            weight = section.weight,
            questions = section.question_count(),
            "section loaded"
        );
    }
    info!(
        questions = catalog.question_count(),
        eligibility_threshold = config.engine.eligibility_threshold,
        cooldown_days = config.engine.cooldown_days,
        autosave_window_ms = config.engine.autosave_window_ms,
        "catalog valid, engine configuration ok"
    );
}
