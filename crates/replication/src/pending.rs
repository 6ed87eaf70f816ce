//! Pending ranges: ownership that is about to change.
//!
//! While a node bootstraps or decommissions, the endpoints that will own a
//! range once the operation completes are recorded here per keyspace. Writes
//! for tokens in such a range have an owner that is not yet final.

use std::collections::{HashMap, HashSet};

use corelib::token::Murmur3Token;
use corelib::{Endpoint, TokenRange};

#[derive(Debug, Clone, Default)]
pub struct PendingRanges {
    by_keyspace: HashMap<String, Vec<(TokenRange<Murmur3Token>, Endpoint)>>,
}

impl PendingRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `endpoint` will become a replica of `range` in `keyspace`.
    pub fn add(&mut self, keyspace: impl Into<String>, range: TokenRange<Murmur3Token>, endpoint: Endpoint) {
        self.by_keyspace
            .entry(keyspace.into())
            .or_default()
            .push((range, endpoint));
    }

    /// Drop every pending entry of `endpoint` (its topology change finished).
    pub fn remove_endpoint(&mut self, endpoint: &Endpoint) {
        for entries in self.by_keyspace.values_mut() {
            entries.retain(|(_, pending)| pending != endpoint);
        }
        self.by_keyspace.retain(|_, entries| !entries.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.by_keyspace.is_empty()
    }

    /// Endpoints whose pending range in `keyspace` contains `token`.
    pub fn pending_endpoints_for(&self, token: &Murmur3Token, keyspace: &str) -> HashSet<Endpoint> {
        self.by_keyspace
            .get(keyspace)
            .into_iter()
            .flatten()
            .filter(|(range, _)| range.contains(token))
            .map(|(_, endpoint)| *endpoint)
            .collect()
    }
}
