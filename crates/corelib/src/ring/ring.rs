//! Live ring and its builder.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::network::Endpoint;
use crate::node::Node;
use crate::ring::snapshot::RingSnapshot;
use crate::token::Murmur3Token;
use crate::vnode::VirtualNode;

/// Default number of vnodes per node.
pub const DEFAULT_VNODES: usize = 256;

/// Mutable ring shared between the routing path and membership changes.
///
/// Writers copy the current snapshot, apply their change and swap the new
/// snapshot in; readers take an `Arc` and never block on later writes.
#[derive(Debug, Default)]
pub struct HashRing {
    state: RwLock<Arc<RingSnapshot>>,
}

impl HashRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current topology, frozen.
    pub fn snapshot(&self) -> Arc<RingSnapshot> {
        self.state.read().clone()
    }

    /// Add a node with `vnodes` derived tokens.
    ///
    /// Adding the same node again adds more vnodes rather than replacing.
    pub fn add_node(&self, node: Node, vnodes: usize) {
        let tokens: Vec<_> = (0..vnodes)
            .map(|i| VirtualNode::from_index(node.endpoint, i).token())
            .collect();
        self.add_node_with_tokens(node, tokens);
    }

    /// Add a node owning exactly `tokens`.
    ///
    /// A token that is already owned moves to the new node.
    pub fn add_node_with_tokens(&self, node: Node, tokens: impl IntoIterator<Item = Murmur3Token>) {
        self.mutate(|state| {
            let endpoint = node.endpoint;
            for token in tokens {
                state.tokens.insert(token, endpoint);
            }
            state.nodes.insert(endpoint, node);
            debug!(%endpoint, tokens = state.tokens.len(), "node added to ring");
            true
        });
    }

    /// Remove a node and all of its tokens. Returns false if it was unknown.
    ///
    /// Removing an unknown node leaves the snapshot and its epoch untouched.
    pub fn remove_node(&self, endpoint: &Endpoint) -> bool {
        let removed = self.mutate(|state| {
            if state.nodes.remove(endpoint).is_none() {
                return false;
            }
            state.tokens.retain(|_, owner| owner != endpoint);
            true
        });
        if removed {
            debug!(%endpoint, "node removed from ring");
        }
        removed
    }

    pub fn node_count(&self) -> usize {
        self.state.read().node_count()
    }

    pub fn token_count(&self) -> usize {
        self.state.read().token_count()
    }

    /// Applies `f` to a copy of the current snapshot. The copy is swapped in
    /// with a new epoch only when `f` returns true.
    fn mutate(&self, f: impl FnOnce(&mut RingSnapshot) -> bool) -> bool {
        let mut guard = self.state.write();
        let mut next: RingSnapshot = (**guard).clone();
        if !f(&mut next) {
            return false;
        }
        next.epoch = guard.epoch + 1;
        *guard = Arc::new(next);
        true
    }
}

/// Builder for ring snapshots.
#[derive(Debug)]
pub struct RingBuilder {
    vnodes: usize,
    ring: HashRing,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            vnodes: DEFAULT_VNODES,
            ring: HashRing::new(),
        }
    }

    /// Vnode count used by [`RingBuilder::add_node`].
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn add_node(self, node: Node) -> Self {
        self.ring.add_node(node, self.vnodes);
        self
    }

    pub fn add_node_with_vnodes(self, node: Node, vnodes: usize) -> Self {
        self.ring.add_node(node, vnodes);
        self
    }

    pub fn add_node_with_tokens(self, node: Node, tokens: impl IntoIterator<Item = Murmur3Token>) -> Self {
        self.ring.add_node_with_tokens(node, tokens);
        self
    }

    pub fn build(self) -> HashRing {
        self.ring
    }

    pub fn snapshot(self) -> Arc<RingSnapshot> {
        self.ring.snapshot()
    }
}
