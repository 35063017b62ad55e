//! Run and check result types.

use partsink_types::{PartitionId, PartitionReport};

/// A partition that produced no report (connection or input failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFailure {
    pub partition: PartitionId,
    pub error: String,
}

/// Result of loading a set of partitions.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Reports of partitions that connected, ordered by partition id.
    pub reports: Vec<PartitionReport>,
    /// Partitions that failed as a whole, ordered by partition id.
    pub failures: Vec<PartitionFailure>,
    pub duration_secs: f64,
}

impl RunResult {
    #[must_use]
    pub fn partitions(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    #[must_use]
    pub fn records_read(&self) -> usize {
        self.reports.iter().map(|r| r.records).sum()
    }

    #[must_use]
    pub fn records_written(&self) -> usize {
        self.reports.iter().map(PartitionReport::records_written).sum()
    }

    #[must_use]
    pub fn records_failed(&self) -> usize {
        self.reports.iter().map(PartitionReport::records_failed).sum()
    }

    #[must_use]
    pub fn chunks_written(&self) -> usize {
        self.reports.iter().map(PartitionReport::chunks_written).sum()
    }

    #[must_use]
    pub fn chunks_failed(&self) -> usize {
        self.reports.iter().map(PartitionReport::chunks_failed).sum()
    }

    /// True when every partition connected and every chunk was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.reports.iter().all(PartitionReport::is_success)
    }
}

/// One line of a sink check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub ok: bool,
    pub message: String,
}

impl CheckItem {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Result of a sink check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub endpoint: String,
    pub connection: CheckItem,
    /// `None` when the connection failed and the table was not looked up.
    pub table: Option<CheckItem>,
}

impl CheckResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.connection.ok && self.table.as_ref().is_some_and(|t| t.ok)
    }
}
