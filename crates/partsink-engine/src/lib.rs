//! Partition chunking and loading for partsink.
//!
//! A partition of string records is drained, split into size-bounded
//! chunks by [`partition`], and each chunk is written to the sink on its own
//! by a [`PartitionLoader`]. [`run_partitions`] drives many partitions in
//! parallel, one blocking worker per partition.

pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod partition;
pub mod result;
pub mod source;

pub use errors::{LoadError, PipelineError};
pub use loader::PartitionLoader;
pub use orchestrator::{build_loader, check_sink, run_partitions, run_pipeline};
pub use partition::{partition, Chunks, DEFAULT_MAX_CHUNK_SIZE};
pub use result::{CheckItem, CheckResult, PartitionFailure, RunResult};
