//! Errors raised while assembling replication metadata.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    #[error("keyspace {0} is already defined")]
    DuplicateKeyspace(String),
    #[error("keyspace {keyspace}: replication factor must be positive")]
    ZeroReplicationFactor { keyspace: String },
}
