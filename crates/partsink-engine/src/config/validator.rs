//! Semantic validation for parsed pipeline configuration values.

use anyhow::{bail, Result};
use partsink_sink::InsertStatement;

use crate::config::types::PipelineConfig;

/// Validate a parsed pipeline configuration.
///
/// # Errors
///
/// Returns an error listing every validation failure found.
pub fn validate_pipeline(config: &PipelineConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(format!(
            "Unsupported pipeline version '{}', expected '1.0'",
            config.version
        ));
    }

    if config.pipeline.trim().is_empty() {
        errors.push("Pipeline name must not be empty".to_string());
    }

    if config.sink.url.trim().is_empty() {
        errors.push("sink.url must not be empty".to_string());
    }

    if let Err(e) = InsertStatement::new(&config.sink.table, &config.sink.columns) {
        errors.push(format!("sink: {e}"));
    }

    if config.batching.max_chunk_size == 0 {
        errors.push("batching.max_chunk_size must be at least 1".to_string());
    }

    if config.resources.parallelism == 0 {
        errors.push("resources.parallelism must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        bail!("Pipeline validation failed:\n  - {}", errors.join("\n  - "));
    }
}
