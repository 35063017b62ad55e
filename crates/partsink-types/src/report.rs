//! Per-partition aggregation of chunk outcomes.

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkOutcome;
use crate::record::PartitionId;

/// Everything one partition invocation produced, in chunk emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionReport {
    pub partition: PartitionId,
    /// Records received from the source, before chunking.
    pub records: usize,
    pub outcomes: Vec<ChunkOutcome>,
}

impl PartitionReport {
    /// Report for a partition that delivered no records.
    #[must_use]
    pub fn empty(partition: PartitionId) -> Self {
        Self {
            partition,
            records: 0,
            outcomes: Vec::new(),
        }
    }

    #[must_use]
    pub fn chunks_written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    #[must_use]
    pub fn chunks_failed(&self) -> usize {
        self.outcomes.len() - self.chunks_written()
    }

    /// Records contained in chunks whose write succeeded.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.records)
            .sum()
    }

    /// Records contained in chunks whose write failed.
    #[must_use]
    pub fn records_failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.records)
            .sum()
    }

    pub fn failed_chunks(&self) -> impl Iterator<Item = &ChunkOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ChunkOutcome::is_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkStatus;

    fn outcome(index: usize, records: usize, ok: bool) -> ChunkOutcome {
        ChunkOutcome {
            index,
            records,
            size: records * 10,
            status: if ok {
                ChunkStatus::Written {
                    rows: records as u64,
                }
            } else {
                ChunkStatus::Failed {
                    reason: "boom".into(),
                }
            },
        }
    }

    #[test]
    fn empty_report_is_successful() {
        let report = PartitionReport::empty(PartitionId::new(0));
        assert!(report.is_success());
        assert_eq!(report.chunks_written(), 0);
        assert_eq!(report.records_written(), 0);
    }

    #[test]
    fn counts_split_by_status() {
        let report = PartitionReport {
            partition: PartitionId::new(2),
            records: 9,
            outcomes: vec![outcome(0, 3, true), outcome(1, 4, false), outcome(2, 2, true)],
        };
        assert_eq!(report.chunks_written(), 2);
        assert_eq!(report.chunks_failed(), 1);
        assert_eq!(report.records_written(), 5);
        assert_eq!(report.records_failed(), 4);
        assert!(!report.is_success());
        let failed: Vec<usize> = report.failed_chunks().map(|o| o.index).collect();
        assert_eq!(failed, vec![1]);
    }
}
