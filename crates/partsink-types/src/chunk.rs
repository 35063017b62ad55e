//! Chunks of a partition and the per-chunk write outcome.

use serde::{Deserialize, Serialize};

/// A contiguous, order-preserving slice of a partition submitted as one
/// sink write.
///
/// `size` is the summed length of `records` in the unit the chunk was
/// measured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub index: usize,
    pub records: &'a [String],
    pub size: usize,
}

impl<'a> Chunk<'a> {
    /// Number of records in the chunk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Owned copy of the chunk's records.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.records.to_vec()
    }
}

/// Result of writing one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChunkStatus {
    /// The statement executed; `rows` is what the sink reported as affected.
    Written { rows: u64 },
    /// The statement failed to prepare or execute.
    Failed { reason: String },
}

/// Outcome of one chunk write, detached from the chunk's borrowed records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOutcome {
    pub index: usize,
    pub records: usize,
    pub size: usize,
    #[serde(flatten)]
    pub status: ChunkStatus,
}

impl ChunkOutcome {
    /// Build an outcome for `chunk` with the given status.
    #[must_use]
    pub fn new(chunk: &Chunk<'_>, status: ChunkStatus) -> Self {
        Self {
            index: chunk.index,
            records: chunk.len(),
            size: chunk.size,
            status,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, ChunkStatus::Written { .. })
    }

    /// Failure reason, if the chunk failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            ChunkStatus::Written { .. } => None,
            ChunkStatus::Failed { reason } => Some(reason),
        }
    }
}
