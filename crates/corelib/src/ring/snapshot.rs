//! Immutable view of the ring at one topology epoch.

use std::collections::{BTreeMap, HashMap};

use crate::network::Endpoint;
use crate::node::Node;
use crate::token::Murmur3Token;

/// Token ownership plus node metadata, frozen at one epoch.
///
/// Snapshots are cheap to share behind an `Arc` and never change, so base and
/// view lookups made against the same snapshot are mutually consistent.
#[derive(Clone, Debug, Default)]
pub struct RingSnapshot {
    pub(crate) tokens: BTreeMap<Murmur3Token, Endpoint>,
    pub(crate) nodes: HashMap<Endpoint, Node>,
    pub(crate) epoch: u64,
}

impl RingSnapshot {
    /// Topology version; bumped on every ring mutation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn node(&self, endpoint: &Endpoint) -> Option<&Node> {
        self.nodes.get(endpoint)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Owner of the first ring token at or after `token`, wrapping.
    pub fn primary(&self, token: &Murmur3Token) -> Option<Endpoint> {
        self.walk_from(token).next()
    }

    /// Token owners clockwise from `token`, visiting every ring token once.
    ///
    /// The walk starts at the first token `>= token` and wraps past the
    /// maximum. Owners repeat when they hold several tokens; strategies are
    /// expected to skip endpoints they have already picked.
    pub fn walk_from<'a>(&'a self, token: &Murmur3Token) -> impl Iterator<Item = Endpoint> + 'a {
        self.tokens
            .range(*token..)
            .chain(self.tokens.range(..*token))
            .map(|(_, endpoint)| *endpoint)
    }
}
