//! Loads one partition into the sink.

use partsink_sink::{Connector, InsertStatement, SinkConnection, SinkWriter};
use partsink_types::{PartitionId, PartitionReport};

use crate::config::types::BatchingConfig;
use crate::errors::LoadError;
use crate::partition::partition;

/// Writes partitions to one sink endpoint with one fixed statement.
///
/// Holds no per-partition state, so a single loader can be shared by
/// every worker of a run.
#[derive(Debug)]
pub struct PartitionLoader<C: Connector> {
    connector: C,
    statement: InsertStatement,
    batching: BatchingConfig,
}

impl<C: Connector> PartitionLoader<C> {
    pub fn new(connector: C, statement: InsertStatement, batching: BatchingConfig) -> Self {
        Self {
            connector,
            statement,
            batching,
        }
    }

    #[must_use]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    #[must_use]
    pub fn statement(&self) -> &InsertStatement {
        &self.statement
    }

    #[must_use]
    pub fn batching(&self) -> BatchingConfig {
        self.batching
    }

    /// Drain `records`, chunk them, and write every chunk.
    ///
    /// An empty partition returns immediately without connecting. Otherwise
    /// exactly one connection is opened and it is released before this
    /// returns, whatever the chunk outcomes were.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Connect`] if the sink cannot be reached. Chunk
    /// failures are reported in the returned [`PartitionReport`] instead.
    pub fn save_partition<I>(
        &self,
        partition_id: PartitionId,
        records: I,
    ) -> Result<PartitionReport, LoadError>
    where
        I: IntoIterator<Item = String>,
    {
        let records: Vec<String> = records.into_iter().collect();
        if records.is_empty() {
            tracing::debug!(partition = %partition_id, "Empty partition, nothing to write");
            return Ok(PartitionReport::empty(partition_id));
        }

        tracing::info!(
            partition = %partition_id,
            records = records.len(),
            max_chunk_size = self.batching.max_chunk_size,
            "Loading partition"
        );

        let mut connection = self.connector.connect().map_err(|source| LoadError::Connect {
            partition: partition_id,
            endpoint: self.connector.endpoint(),
            source,
        })?;

        let outcomes = {
            let chunks = partition(
                &records,
                self.batching.max_chunk_size,
                self.batching.length_unit,
            );
            SinkWriter::new(&mut connection, &self.statement).write_all(chunks)
        };

        if let Err(e) = connection.close() {
            tracing::warn!(
                partition = %partition_id,
                error = %e,
                "Failed to close sink connection cleanly"
            );
        }

        let report = PartitionReport {
            partition: partition_id,
            records: records.len(),
            outcomes,
        };

        if report.is_success() {
            tracing::info!(
                partition = %partition_id,
                records = report.records,
                chunks = report.outcomes.len(),
                "Partition written"
            );
        } else {
            tracing::warn!(
                partition = %partition_id,
                records_written = report.records_written(),
                records_failed = report.records_failed(),
                chunks_failed = report.chunks_failed(),
                "Partition written with failed chunks"
            );
        }

        Ok(report)
    }
}
