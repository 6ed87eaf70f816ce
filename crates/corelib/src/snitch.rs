//! Endpoint snitch: where each endpoint lives.
//!
//! The snitch answers "which datacenter and rack is this endpoint in?".
//! Locations are learned from the ring's node metadata or set explicitly;
//! unknown endpoints fall back to a configurable default location.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::network::Endpoint;
use crate::node::Node;
use crate::topology::DatacenterResolver;

pub const DEFAULT_DATACENTER: &str = "datacenter1";
pub const DEFAULT_RACK: &str = "rack1";

/// Datacenter and rack of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub datacenter: String,
    pub rack: String,
}

impl Location {
    pub fn new(datacenter: impl Into<String>, rack: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_DATACENTER, DEFAULT_RACK)
    }
}

/// Snitch backed by an explicit endpoint → location table.
///
/// Safe to update concurrently with lookups (e.g. as gossip learns new peers).
#[derive(Debug, Default)]
pub struct PropertySnitch {
    locations: DashMap<Endpoint, Location>,
    default: Location,
}

impl PropertySnitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snitch whose unknown endpoints resolve to `default`.
    pub fn with_default(default: Location) -> Self {
        Self {
            locations: DashMap::new(),
            default,
        }
    }

    /// Snitch seeded from node metadata; missing labels use the defaults.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let snitch = Self::new();
        for node in nodes {
            let location = Location::new(
                node.datacenter.as_deref().unwrap_or(&snitch.default.datacenter),
                node.rack.as_deref().unwrap_or(&snitch.default.rack),
            );
            snitch.set_location(node.endpoint, location);
        }
        snitch
    }

    pub fn set_location(&self, endpoint: Endpoint, location: Location) {
        self.locations.insert(endpoint, location);
    }

    pub fn location_of(&self, endpoint: &Endpoint) -> Location {
        self.locations
            .get(endpoint)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn rack_of(&self, endpoint: &Endpoint) -> String {
        self.location_of(endpoint).rack
    }
}

impl DatacenterResolver for PropertySnitch {
    fn datacenter_of(&self, endpoint: &Endpoint) -> String {
        match self.locations.get(endpoint) {
            Some(entry) => entry.datacenter.clone(),
            None => self.default.datacenter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_unknown_endpoint_uses_default() {
        let snitch = PropertySnitch::with_default(Location::new("dc-east", "r9"));
        assert_eq!(snitch.datacenter_of(&ep("10.0.0.1")), "dc-east");
        assert_eq!(snitch.rack_of(&ep("10.0.0.1")), "r9");
    }

    #[test]
    fn test_from_nodes() {
        let nodes = vec![
            Node::with_topology(ep("10.0.0.1"), "a", Some("dc1".to_string()), Some("r1".to_string())),
            Node::new(ep("10.0.0.2"), "b"),
        ];
        let snitch = PropertySnitch::from_nodes(&nodes);
        assert_eq!(snitch.location_of(&ep("10.0.0.1")), Location::new("dc1", "r1"));
        assert_eq!(snitch.location_of(&ep("10.0.0.2")), Location::default());
    }

    #[test]
    fn test_set_location_overrides() {
        let snitch = PropertySnitch::new();
        snitch.set_location(ep("10.0.0.3"), Location::new("dc2", "r2"));
        assert_eq!(snitch.datacenter_of(&ep("10.0.0.3")), "dc2");
    }
}
