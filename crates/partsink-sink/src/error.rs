//! Sink error types.

/// Errors produced while connecting to or writing into the sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The connection URL could not be parsed.
    #[error("invalid connection url: {0}")]
    InvalidUrl(#[source] postgres::Error),

    /// Underlying `PostgreSQL` failure, tagged with the operation that raised it.
    #[error("{operation} failed: {source}")]
    Postgres {
        operation: &'static str,
        #[source]
        source: postgres::Error,
    },

    /// The insert statement could not be built from its table and columns.
    #[error("invalid insert statement: {0}")]
    InvalidStatement(String),

    /// The sink refused the operation without a driver error.
    #[error("sink rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },
}

impl SinkError {
    pub(crate) fn postgres(operation: &'static str, source: postgres::Error) -> Self {
        Self::Postgres { operation, source }
    }

    /// Build a [`SinkError::Rejected`].
    pub fn rejected(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, SinkError>;
