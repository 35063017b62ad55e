//! Shared partsink record, chunk and report types.
//!
//! Pure data types with no I/O so the sink and engine crates can share them
//! without depending on each other.

pub mod chunk;
pub mod message;
pub mod record;
pub mod report;

pub use chunk::{Chunk, ChunkOutcome, ChunkStatus};
pub use message::KeyedMessage;
pub use record::{LengthUnit, PartitionId};
pub use report::PartitionReport;
