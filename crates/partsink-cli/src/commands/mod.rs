pub mod check;
pub mod chunks;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use partsink_engine::config::types::PipelineConfig;
use partsink_engine::config::{parser, validator};
use partsink_engine::source::{partition_inputs, PartitionInput};

/// Parse and validate the pipeline file.
fn load_pipeline(pipeline_path: &Path) -> Result<PipelineConfig> {
    let config = parser::parse_pipeline(pipeline_path)
        .with_context(|| format!("Failed to parse pipeline: {}", pipeline_path.display()))?;
    validator::validate_pipeline(&config)?;
    Ok(config)
}

/// Number the input arguments as partitions; no arguments means stdin.
fn inputs_or_stdin(args: &[String]) -> Vec<PartitionInput> {
    if args.is_empty() {
        partition_inputs(&["-"])
    } else {
        partition_inputs(args)
    }
}
