//! Replication strategy abstractions.
//!
//! Replication strategies determine how many replicas to create and where
//! to place them on the ring:
//!
//! - **SimpleStrategy**: N replicas placed sequentially around the ring
//! - **NetworkTopologyStrategy**: a replica count per datacenter

pub mod network_topology;
pub mod simple;

pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use corelib::token::Murmur3Token;
use corelib::{DatacenterResolver, Endpoint, RingSnapshot};

/// Trait for replication strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they are shared
/// between every routing call.
pub trait ReplicationStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// Total number of replicas this strategy places.
    fn replication_factor(&self) -> usize;

    /// Ordered natural endpoints for `token` (primary first).
    ///
    /// # Performance
    /// O(t) worst case in the number of ring tokens; typically stops after
    /// a few steps of the clockwise walk.
    fn natural_endpoints(
        &self,
        ring: &RingSnapshot,
        snitch: &dyn DatacenterResolver,
        token: &Murmur3Token,
    ) -> Vec<Endpoint>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
