//! Virtual node abstractions.
//!
//! Each physical node owns several tokens on the ring (virtual nodes). When a
//! node joins without explicit tokens, its vnode tokens are derived by hashing
//! `"<endpoint>:<index>"`, so the same endpoint always lands on the same
//! positions.

use crate::network::Endpoint;
use crate::token::murmur3::Murmur3Token;

/// A virtual node on the ring.
///
/// Represents a single token position owned by a physical node.
///
/// # Invariants
///
/// - Every `VirtualNode` belongs to exactly one physical node
/// - Tokens are ordered, so vnodes sort by ring position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Murmur3Token,

    /// The physical node that owns this virtual node.
    pub endpoint: Endpoint,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: Murmur3Token, endpoint: Endpoint) -> Self {
        Self { token, endpoint }
    }

    /// Create a virtual node from an endpoint and vnode index.
    ///
    /// # Example
    /// ```rust
    /// use corelib::{Endpoint, VirtualNode};
    ///
    /// let ep: Endpoint = "10.0.0.1".parse().unwrap();
    /// let vnode0 = VirtualNode::from_index(ep, 0);
    /// let vnode1 = VirtualNode::from_index(ep, 1);
    /// assert_ne!(vnode0.token(), vnode1.token());
    /// ```
    pub fn from_index(endpoint: Endpoint, vnode_index: usize) -> Self {
        // Format: "endpoint:vnode_index" ensures uniqueness per node
        let vnode_key = format!("{}:{}", endpoint, vnode_index);
        Self::new(Murmur3Token::from_key(&vnode_key), endpoint)
    }

    #[inline]
    pub fn token(&self) -> Murmur3Token {
        self.token
    }

    #[inline]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={:016x}, node={})", self.token.0, self.endpoint)
    }
}
