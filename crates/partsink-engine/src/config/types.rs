//! Pipeline YAML model.

use partsink_types::LengthUnit;
use serde::Deserialize;

use crate::partition::DEFAULT_MAX_CHUNK_SIZE;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub version: String,
    pub pipeline: String,
    pub sink: SinkConfig,
    #[serde(default)]
    pub batching: BatchingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
}

/// Target table and connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    /// libpq-style connection string or `postgresql://` URI.
    pub url: String,
    /// `table` or `schema.table`.
    pub table: String,
    /// Literal column/type list the records are shaped into,
    /// e.g. `"id varchar(20), temperature numeric(12,5)"`.
    pub columns: String,
}

/// Chunk size bound applied to every partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchingConfig {
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
    #[serde(default)]
    pub length_unit: LengthUnit,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            length_unit: LengthUnit::default(),
        }
    }
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

/// How input partitions are decoded into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// One record per non-empty line.
    #[default]
    Lines,
    /// One JSON `{"key": ..., "value": ...}` message per line; the value is the record.
    Keyed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default)]
    pub format: InputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Partitions loaded concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}

fn default_parallelism() -> usize {
    1
}
