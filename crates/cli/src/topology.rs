//! JSON topology file.
//!
//! ```json
//! {
//!   "vnodes": 16,
//!   "nodes": [
//!     { "endpoint": "10.0.0.1", "datacenter": "dc1", "rack": "r1", "tokens": [100] },
//!     { "endpoint": "10.0.1.1", "datacenter": "dc2" }
//!   ],
//!   "keyspaces": [
//!     { "name": "app", "class": "NetworkTopologyStrategy", "datacenters": { "dc1": 3, "dc2": 3 } },
//!     { "name": "cache", "class": "SimpleStrategy", "replication_factor": 2 }
//!   ],
//!   "pending": [
//!     { "keyspace": "app", "left": 100, "right": 200, "endpoint": "10.0.0.9" }
//!   ]
//! }
//! ```
//!
//! Nodes without explicit tokens get `vnodes` derived tokens.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use corelib::ring::ring::DEFAULT_VNODES;
use corelib::token::Murmur3Token;
use corelib::{Endpoint, Node, RingBuilder, TokenRange};
use replication::{ClusterMetadata, Keyspace, NetworkTopologyStrategy, SimpleStrategy};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyFile {
    #[serde(default)]
    pub vnodes: Option<usize>,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub keyspaces: Vec<KeyspaceSpec>,
    #[serde(default)]
    pub pending: Vec<PendingSpec>,
}

#[derive(Debug, Deserialize)]
pub struct NodeSpec {
    pub endpoint: Endpoint,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub datacenter: Option<String>,
    #[serde(default)]
    pub rack: Option<String>,
    #[serde(default)]
    pub tokens: Vec<Murmur3Token>,
}

#[derive(Debug, Deserialize)]
pub struct KeyspaceSpec {
    pub name: String,
    #[serde(flatten)]
    pub strategy: StrategySpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "class")]
pub enum StrategySpec {
    SimpleStrategy { replication_factor: usize },
    NetworkTopologyStrategy { datacenters: BTreeMap<String, usize> },
}

#[derive(Debug, Deserialize)]
pub struct PendingSpec {
    pub keyspace: String,
    pub left: Murmur3Token,
    pub right: Murmur3Token,
    pub endpoint: Endpoint,
}

impl TopologyFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading topology file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing topology file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_metadata(self) -> anyhow::Result<ClusterMetadata> {
        let vnodes = self.vnodes.unwrap_or(DEFAULT_VNODES);
        let mut builder = RingBuilder::new().with_vnodes(vnodes);
        for spec in self.nodes {
            let name = spec.name.unwrap_or_else(|| spec.endpoint.to_string());
            let node = Node::with_topology(spec.endpoint, name, spec.datacenter, spec.rack);
            builder = if spec.tokens.is_empty() {
                builder.add_node(node)
            } else {
                builder.add_node_with_tokens(node, spec.tokens)
            };
        }
        let ring = builder.snapshot();
        info!(nodes = ring.node_count(), tokens = ring.token_count(), "ring loaded");

        let mut metadata = ClusterMetadata::from_ring(ring);
        for spec in self.keyspaces {
            let keyspace = match spec.strategy {
                StrategySpec::SimpleStrategy { replication_factor } => {
                    Keyspace::new(spec.name, SimpleStrategy::new(replication_factor))
                }
                StrategySpec::NetworkTopologyStrategy { datacenters } => {
                    Keyspace::new(spec.name, NetworkTopologyStrategy::new(datacenters))
                }
            }?;
            metadata.add_keyspace(keyspace)?;
        }
        for spec in self.pending {
            metadata
                .pending_mut()
                .add(spec.keyspace, TokenRange::new(spec.left, spec.right), spec.endpoint);
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::topology::{DatacenterResolver, PendingReplicaProvider, ReplicaSetProvider};

    fn ep(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_topology() {
        let raw = r#"{
            "vnodes": 8,
            "nodes": [
                { "endpoint": "10.0.0.1", "datacenter": "dc1", "tokens": [100] },
                { "endpoint": "10.0.0.2:7001", "name": "b", "datacenter": "dc2", "tokens": [200] },
                { "endpoint": "10.0.0.3" }
            ],
            "keyspaces": [
                { "name": "app", "class": "NetworkTopologyStrategy", "datacenters": { "dc1": 1, "dc2": 1 } }
            ],
            "pending": [
                { "keyspace": "app", "left": 100, "right": 200, "endpoint": "10.0.0.9" }
            ]
        }"#;
        let md = TopologyFile::from_json(raw).unwrap().into_metadata().unwrap();

        assert_eq!(md.ring().node_count(), 3);
        assert_eq!(md.ring().token_count(), 1 + 1 + 8);
        assert_eq!(md.datacenter_of(&ep("10.0.0.2:7001")), "dc2");
        assert_eq!(md.datacenter_of(&ep("10.0.0.3")), "datacenter1");
        assert_eq!(md.ring().node(&ep("10.0.0.2:7001")).unwrap().name, "b");
        assert_eq!(md.natural_endpoints("app", &Murmur3Token(150)).unwrap().len(), 2);
        assert!(md.pending_endpoints(&Murmur3Token(150), "app").contains(&ep("10.0.0.9")));
    }

    #[test]
    fn test_unknown_strategy_class() {
        let raw = r#"{
            "nodes": [],
            "keyspaces": [ { "name": "x", "class": "LocalStrategy" } ]
        }"#;
        assert!(TopologyFile::from_json(raw).is_err());
    }

    #[test]
    fn test_zero_replication_factor() {
        let raw = r#"{
            "nodes": [ { "endpoint": "10.0.0.1", "tokens": [1] } ],
            "keyspaces": [ { "name": "x", "class": "SimpleStrategy", "replication_factor": 0 } ]
        }"#;
        let err = TopologyFile::from_json(raw).unwrap().into_metadata().unwrap_err();
        assert!(err.to_string().contains("replication factor"));
    }
}
