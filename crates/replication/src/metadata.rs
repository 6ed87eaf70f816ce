//! One consistent view of the cluster for routing.
//!
//! [`ClusterMetadata`] bundles a ring snapshot, the snitch, keyspace
//! definitions and pending ranges. Because the ring inside is frozen, base
//! and view lookups made through the same metadata always agree on the
//! topology epoch.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use corelib::token::Murmur3Token;
use corelib::topology::{DatacenterResolver, PendingReplicaProvider, ReplicaSetProvider};
use corelib::{Endpoint, Error, PropertySnitch, RingSnapshot};
use tracing::trace;

use crate::error::ReplicationError;
use crate::keyspace::Keyspace;
use crate::pending::PendingRanges;

#[derive(Debug, Clone)]
pub struct ClusterMetadata {
    ring: Arc<RingSnapshot>,
    snitch: Arc<PropertySnitch>,
    keyspaces: HashMap<String, Keyspace>,
    pending: PendingRanges,
}

impl ClusterMetadata {
    pub fn new(ring: Arc<RingSnapshot>, snitch: Arc<PropertySnitch>) -> Self {
        Self {
            ring,
            snitch,
            keyspaces: HashMap::new(),
            pending: PendingRanges::new(),
        }
    }

    /// Metadata whose snitch is derived from the ring's node labels.
    pub fn from_ring(ring: Arc<RingSnapshot>) -> Self {
        let snitch = Arc::new(PropertySnitch::from_nodes(ring.nodes()));
        Self::new(ring, snitch)
    }

    pub fn add_keyspace(&mut self, keyspace: Keyspace) -> Result<(), ReplicationError> {
        if self.keyspaces.contains_key(keyspace.name()) {
            return Err(ReplicationError::DuplicateKeyspace(keyspace.name().to_string()));
        }
        self.keyspaces.insert(keyspace.name().to_string(), keyspace);
        Ok(())
    }

    pub fn with_pending(mut self, pending: PendingRanges) -> Self {
        self.pending = pending;
        self
    }

    pub fn pending_mut(&mut self) -> &mut PendingRanges {
        &mut self.pending
    }

    pub fn ring(&self) -> &RingSnapshot {
        &self.ring
    }

    pub fn snitch(&self) -> &PropertySnitch {
        &self.snitch
    }

    pub fn keyspace(&self, name: &str) -> Option<&Keyspace> {
        self.keyspaces.get(name)
    }
}

impl ReplicaSetProvider for ClusterMetadata {
    type Token = Murmur3Token;

    fn natural_endpoints(&self, keyspace: &str, token: &Murmur3Token) -> corelib::Result<Vec<Endpoint>> {
        let ks = self
            .keyspace(keyspace)
            .ok_or_else(|| Error::UnknownKeyspace(keyspace.to_string()))?;
        let replicas = ks
            .strategy()
            .natural_endpoints(&self.ring, self.snitch.as_ref(), token);
        trace!(
            keyspace,
            %token,
            epoch = self.ring.epoch(),
            replicas = replicas.len(),
            "natural endpoints"
        );
        Ok(replicas)
    }
}

impl DatacenterResolver for ClusterMetadata {
    fn datacenter_of(&self, endpoint: &Endpoint) -> String {
        self.snitch.datacenter_of(endpoint)
    }
}

impl PendingReplicaProvider for ClusterMetadata {
    type Token = Murmur3Token;

    fn pending_endpoints(&self, token: &Murmur3Token, keyspace: &str) -> HashSet<Endpoint> {
        self.pending.pending_endpoints_for(token, keyspace)
    }
}
