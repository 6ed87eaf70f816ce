//! Datacenter-aware replication strategy.
//!
//! Each datacenter gets its own replication factor. The ring is walked once
//! clockwise from the key's token; an owner is taken if its datacenter still
//! needs replicas. The result keeps walk order, so endpoints of different
//! datacenters interleave the way they appear on the ring.
//!
//! Racks are not considered.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::strategy::ReplicationStrategy;
use corelib::token::Murmur3Token;
use corelib::{DatacenterResolver, Endpoint, RingSnapshot};

#[derive(Debug, Clone, Default)]
pub struct NetworkTopologyStrategy {
    datacenters: BTreeMap<String, usize>,
}

impl NetworkTopologyStrategy {
    pub fn new(datacenters: impl IntoIterator<Item = (String, usize)>) -> Self {
        Self {
            datacenters: datacenters.into_iter().collect(),
        }
    }

    /// Builder-style: set the replication factor of one datacenter.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>, replication_factor: usize) -> Self {
        self.datacenters.insert(datacenter.into(), replication_factor);
        self
    }

    pub fn datacenter_replication_factor(&self, datacenter: &str) -> usize {
        self.datacenters.get(datacenter).copied().unwrap_or(0)
    }
}

impl ReplicationStrategy for NetworkTopologyStrategy {
    fn replication_factor(&self) -> usize {
        self.datacenters.values().sum()
    }

    fn natural_endpoints(
        &self,
        ring: &RingSnapshot,
        snitch: &dyn DatacenterResolver,
        token: &Murmur3Token,
    ) -> Vec<Endpoint> {
        let wanted = self.replication_factor();
        let mut replicas = Vec::with_capacity(wanted);
        if wanted == 0 {
            return replicas;
        }

        let mut placed: HashMap<String, usize> = HashMap::new();
        let mut seen = HashSet::new();
        for endpoint in ring.walk_from(token) {
            if !seen.insert(endpoint) {
                continue;
            }
            let dc = snitch.datacenter_of(&endpoint);
            let limit = self.datacenter_replication_factor(&dc);
            let count = placed.entry(dc).or_insert(0);
            if *count >= limit {
                continue;
            }
            *count += 1;
            replicas.push(endpoint);

            if replicas.len() >= wanted {
                break;
            }
        }

        replicas
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }
}
