//! Errors for view routing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The local node neither replicates the base token nor can fall back
    /// to a pending topology change. Callers routed a row they do not own.
    #[error("{endpoint} is not a data replica of base token {base_token} in keyspace {keyspace}")]
    NotAReplica {
        keyspace: String,
        base_token: String,
        endpoint: String,
    },

    /// Local base and view replica counts differ after pruning shared
    /// endpoints. The strategy broke its per-datacenter replication factor.
    #[error(
        "keyspace {keyspace}: replication strategy yielded {base} local base replicas but {view} local view replicas"
    )]
    ReplicationInvariant {
        keyspace: String,
        base: usize,
        view: usize,
    },

    #[error(transparent)]
    Topology(#[from] corelib::Error),
}
