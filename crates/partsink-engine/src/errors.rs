//! Partition and pipeline error model.

use partsink_sink::SinkError;
use partsink_types::PartitionId;

/// Failure of one whole partition invocation.
///
/// Per-chunk write failures are not errors; they are reported as
/// [`ChunkStatus::Failed`](partsink_types::ChunkStatus::Failed) outcomes.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The sink could not be reached; no chunk of the partition was written.
    #[error("partition {partition}: cannot connect to {endpoint}: {source}")]
    Connect {
        partition: PartitionId,
        endpoint: String,
        #[source]
        source: SinkError,
    },

    /// The partition input could not be read.
    #[error("partition {partition}: failed to read {input}: {source}")]
    Read {
        partition: PartitionId,
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// A keyed input line was not a valid message.
    #[error("partition {partition}: {input} line {line}: invalid keyed message: {source}")]
    Decode {
        partition: PartitionId,
        input: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The partition the error belongs to.
    #[must_use]
    pub fn partition(&self) -> PartitionId {
        match self {
            Self::Connect { partition, .. }
            | Self::Read { partition, .. }
            | Self::Decode { partition, .. } => *partition,
        }
    }
}

/// Pipeline-level failure that prevents a run from producing a result.
///
/// `Setup` wraps sink configuration that cannot be turned into a loader
/// (bad URL, bad table or columns). `Infrastructure` wraps host-side
/// failures such as a panicked partition worker.
#[derive(Debug)]
pub enum PipelineError {
    Setup(SinkError),
    Infrastructure(anyhow::Error),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "pipeline setup failed: {e}"),
            Self::Infrastructure(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Setup(e) => Some(e),
            Self::Infrastructure(e) => Some(&**e),
        }
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(e: anyhow::Error) -> Self {
        Self::Infrastructure(e)
    }
}

impl From<SinkError> for PipelineError {
    fn from(e: SinkError) -> Self {
        Self::Setup(e)
    }
}
