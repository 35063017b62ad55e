//! Relational sink access for partsink.
//!
//! Provides the [`Connector`] / [`SinkConnection`] contract, a
//! [`PostgresConnector`] implementation, an in-memory [`MemoryConnector`],
//! the bulk [`InsertStatement`], and the per-chunk [`SinkWriter`].

pub mod connection;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod statement;
pub mod writer;

pub use connection::{Connector, SinkConnection};
pub use error::SinkError;
pub use memory::MemoryConnector;
pub use self::postgres::{PostgresConnection, PostgresConnector};
pub use statement::{InsertStatement, TableName};
pub use writer::SinkWriter;
