//! Topology collaborators consumed by view routing.
//!
//! Routing never reaches for process-wide singletons: the ring, the snitch
//! and the pending-range tracker are passed in through these traits, so a
//! routing decision can be evaluated against any fixed topology.

use std::collections::HashSet;

use crate::error::Result;
use crate::network::Endpoint;
use crate::token::Token;

/// Ordered natural replicas per token, as placed by a keyspace's strategy.
pub trait ReplicaSetProvider: Send + Sync {
    type Token: Token;

    /// Natural endpoints for `token` in rank order (primary first).
    ///
    /// Must be deterministic for a fixed ring snapshot. Fails with
    /// [`crate::Error::UnknownKeyspace`] if the keyspace is not registered.
    fn natural_endpoints(&self, keyspace: &str, token: &Self::Token) -> Result<Vec<Endpoint>>;
}

/// Maps an endpoint to its datacenter.
pub trait DatacenterResolver: Send + Sync {
    fn datacenter_of(&self, endpoint: &Endpoint) -> String;
}

/// Endpoints about to become replicas while a bootstrap or decommission is
/// in flight.
pub trait PendingReplicaProvider: Send + Sync {
    type Token: Token;

    fn pending_endpoints(&self, token: &Self::Token, keyspace: &str) -> HashSet<Endpoint>;
}
