//! Node abstractions for the ring.
//!
//! Nodes represent physical participants in the ring. They are identified by
//! their broadcast [`Endpoint`].

use serde::{Deserialize, Serialize};

use crate::network::Endpoint;

/// Logical node participating in the ring.
///
/// Keep this struct small and cheap to clone; heavy mutable state (connections,
/// metrics, etc.) should live elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub endpoint: Endpoint,
    /// Human‑readable name or hostname.
    pub name: String,
    /// Data center label; `None` falls back to the snitch default.
    pub datacenter: Option<String>,
    /// Rack label; `None` falls back to the snitch default.
    pub rack: Option<String>,
}

impl Node {
    /// Construct a new node with basic metadata.
    pub fn new(endpoint: Endpoint, name: impl Into<String>) -> Self {
        Self {
            endpoint,
            name: name.into(),
            datacenter: None,
            rack: None,
        }
    }

    pub fn with_topology(
        endpoint: Endpoint,
        name: impl Into<String>,
        datacenter: impl Into<Option<String>>,
        rack: impl Into<Option<String>>,
    ) -> Self {
        Self {
            endpoint,
            name: name.into(),
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}
