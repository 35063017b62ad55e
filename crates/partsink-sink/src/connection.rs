//! Connection contract between the chunk writer and a concrete sink.

use crate::error;

/// One open connection to the sink.
///
/// The writer only ever needs to prepare a statement with a single
/// positional parameter and execute it with a collection of records bound
/// to that parameter. Dropping a connection releases it.
pub trait SinkConnection {
    /// Driver-specific prepared statement handle.
    type Prepared;

    /// Prepare `sql`, which must contain exactly one positional parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`](crate::SinkError) if the sink rejects the statement.
    fn prepare(&mut self, sql: &str) -> error::Result<Self::Prepared>;

    /// Execute `prepared` with `records` bound as its single parameter.
    /// Returns the number of rows the sink reports as affected.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`](crate::SinkError) if execution fails.
    fn execute(&mut self, prepared: &Self::Prepared, records: &[String]) -> error::Result<u64>;

    /// Release the connection, surfacing any error the sink reports on close.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`](crate::SinkError) if the sink reports a close failure.
    fn close(self) -> error::Result<()>
    where
        Self: Sized;
}

/// Provisions connections to one fixed sink endpoint.
///
/// Implementations must be `Send + Sync` so one connector can serve
/// partitions running on different worker threads.
pub trait Connector: Send + Sync {
    type Connection: SinkConnection;

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`](crate::SinkError) if the sink cannot be reached.
    fn connect(&self) -> error::Result<Self::Connection>;

    /// Human-readable endpoint description, free of credentials.
    fn endpoint(&self) -> String;
}
