//! Keyspaces: a name bound to a replication strategy.

use std::sync::Arc;

use crate::error::ReplicationError;
use crate::strategy::ReplicationStrategy;

/// Replication settings of one keyspace.
///
/// A base table and all of its views live in the same keyspace and therefore
/// share one strategy instance.
#[derive(Debug, Clone)]
pub struct Keyspace {
    name: String,
    strategy: Arc<dyn ReplicationStrategy>,
}

impl Keyspace {
    pub fn new(
        name: impl Into<String>,
        strategy: impl ReplicationStrategy,
    ) -> Result<Self, ReplicationError> {
        let name = name.into();
        if strategy.replication_factor() == 0 {
            return Err(ReplicationError::ZeroReplicationFactor { keyspace: name });
        }
        Ok(Self {
            name,
            strategy: Arc::new(strategy),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> &dyn ReplicationStrategy {
        self.strategy.as_ref()
    }
}
