//! Size-bounded chunking of a partition.
//!
//! Records are accumulated in input order while the running size stays
//! strictly below `max_size`. The record that would reach or cross the
//! bound starts the next chunk. The first record of a chunk is always
//! accepted, so a record that alone meets the bound becomes a singleton
//! chunk instead of stalling the pass or being dropped.

use partsink_types::{Chunk, LengthUnit};

/// Default bound on the summed record length of one chunk.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 10_000;

/// Split `records` into chunks whose summed length is below `max_size`.
///
/// The returned iterator is lazy and borrows `records`; concatenating the
/// chunks it yields reproduces `records` exactly.
#[must_use]
pub fn partition(records: &[String], max_size: usize, unit: LengthUnit) -> Chunks<'_> {
    Chunks {
        records,
        max_size,
        unit,
        pos: 0,
        index: 0,
    }
}

/// Lazy iterator over the chunks of one partition. See [`partition`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    records: &'a [String],
    max_size: usize,
    unit: LengthUnit,
    pos: usize,
    index: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let start = self.pos;
        if start >= self.records.len() {
            return None;
        }

        let mut size: usize = 0;
        while let Some(record) = self.records.get(self.pos) {
            let len = self.unit.measure(record);
            if self.pos > start && size.saturating_add(len) >= self.max_size {
                break;
            }
            size = size.saturating_add(len);
            self.pos += 1;
        }

        let chunk = Chunk {
            index: self.index,
            records: &self.records[start..self.pos],
            size,
        };
        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.pos;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
