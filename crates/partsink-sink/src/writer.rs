//! Per-chunk bulk writes.
//!
//! Each chunk is prepared, bound and executed on its own. A failing chunk is
//! logged and reported as [`ChunkStatus::Failed`]; it never aborts the
//! chunks after it and never rolls back the chunks before it.

use partsink_types::{Chunk, ChunkOutcome, ChunkStatus};

use crate::connection::SinkConnection;
use crate::error;
use crate::statement::InsertStatement;

/// Writes chunks of one partition through a borrowed connection.
pub struct SinkWriter<'a, C: SinkConnection> {
    connection: &'a mut C,
    statement: &'a InsertStatement,
}

impl<'a, C: SinkConnection> SinkWriter<'a, C> {
    pub fn new(connection: &'a mut C, statement: &'a InsertStatement) -> Self {
        Self {
            connection,
            statement,
        }
    }

    /// Write one chunk as a single bulk statement.
    pub fn write(&mut self, chunk: &Chunk<'_>) -> ChunkOutcome {
        tracing::debug!(
            chunk = chunk.index,
            records = chunk.len(),
            size = chunk.size,
            table = %self.statement.table(),
            "Submitting chunk"
        );

        let status = match self.try_write(chunk) {
            Ok(rows) => ChunkStatus::Written { rows },
            Err(e) => {
                tracing::error!(
                    chunk = chunk.index,
                    records = chunk.len(),
                    size = chunk.size,
                    table = %self.statement.table(),
                    error = %e,
                    "Chunk insert failed, skipping chunk"
                );
                ChunkStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        ChunkOutcome::new(chunk, status)
    }

    /// Write every chunk in order, collecting one outcome per chunk.
    pub fn write_all<'c, I>(&mut self, chunks: I) -> Vec<ChunkOutcome>
    where
        I: IntoIterator<Item = Chunk<'c>>,
    {
        chunks.into_iter().map(|chunk| self.write(&chunk)).collect()
    }

    fn try_write(&mut self, chunk: &Chunk<'_>) -> error::Result<u64> {
        let prepared = self.connection.prepare(self.statement.sql())?;
        self.connection.execute(&prepared, chunk.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connector;
    use crate::memory::MemoryConnector;

    fn statement() -> InsertStatement {
        InsertStatement::new("iot.sensor_messages", "id text").unwrap()
    }

    fn recs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn successful_chunk_reports_rows() {
        let sink = MemoryConnector::new();
        let mut conn = sink.connect().unwrap();
        let stmt = statement();
        let records = recs(&["a", "b"]);
        let chunk = Chunk {
            index: 0,
            records: &records,
            size: 2,
        };

        let outcome = SinkWriter::new(&mut conn, &stmt).write(&chunk);
        assert_eq!(outcome.status, ChunkStatus::Written { rows: 2 });
        assert_eq!(sink.rows(), records);
    }

    #[test]
    fn failure_is_isolated_to_its_chunk() {
        let sink = MemoryConnector::new().failing_call(1);
        let mut conn = sink.connect().unwrap();
        let stmt = statement();
        let records = recs(&["a", "b", "c"]);
        let chunks = (0..3).map(|i| Chunk {
            index: i,
            records: &records[i..=i],
            size: 1,
        });

        let outcomes = SinkWriter::new(&mut conn, &stmt).write_all(chunks);
        let ok: Vec<bool> = outcomes.iter().map(ChunkOutcome::is_success).collect();
        assert_eq!(ok, vec![true, false, true]);
        assert_eq!(sink.calls().len(), 3);
        assert_eq!(sink.rows(), recs(&["a", "c"]));
        assert!(outcomes[1]
            .failure_reason()
            .unwrap()
            .contains("injected failure"));
    }
}
