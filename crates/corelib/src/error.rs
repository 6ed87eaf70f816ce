//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid token value
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    /// Invalid endpoint address
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// No replication settings are registered under this keyspace name
    #[error("Unknown keyspace: {0}")]
    UnknownKeyspace(String),
}
