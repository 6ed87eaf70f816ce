//! Which view replica a base replica writes to.
//!
//! # Algorithm
//!
//! 1. Fetch natural replicas of the base token and of the view token
//! 2. If the local node is a view replica, it writes to itself
//! 3. Otherwise pair local-datacenter base and view replicas by rank, after
//!    dropping endpoints shared by both lists ([`LocalReplicas`])
//! 4. The local node's rank among base replicas picks its view replica
//! 5. A node without a rank may still write locally while a topology change
//!    for the view token is in flight; the caller must batchlog that write
//!
//! The resolver keeps no state. All topology comes from the injected
//! collaborators, which should answer from one ring snapshot per call.

use std::fmt;

use corelib::topology::{DatacenterResolver, PendingReplicaProvider, ReplicaSetProvider};
use corelib::Endpoint;
use metrics::counter;
use tracing::{debug, error, warn};

use crate::error::ViewError;
use crate::pairing::LocalReplicas;

/// Resolved view replica and how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    /// The local node replicates the view token and writes to itself.
    SelfReplica(Endpoint),
    /// Rank-paired view replica.
    Paired(Endpoint),
    /// Local node standing in while pending endpoints exist for the view
    /// token. The write must also go to the batchlog.
    Pending(Endpoint),
}

impl ViewTarget {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ViewTarget::SelfReplica(ep) | ViewTarget::Paired(ep) | ViewTarget::Pending(ep) => *ep,
        }
    }

    pub fn into_endpoint(self) -> Endpoint {
        self.endpoint()
    }

    pub fn requires_batchlog(&self) -> bool {
        matches!(self, ViewTarget::Pending(_))
    }

    fn outcome(&self) -> &'static str {
        match self {
            ViewTarget::SelfReplica(_) => "self",
            ViewTarget::Paired(_) => "paired",
            ViewTarget::Pending(_) => "pending",
        }
    }
}

impl fmt::Display for ViewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewTarget::SelfReplica(ep) => write!(f, "{ep} (self)"),
            ViewTarget::Paired(ep) => write!(f, "{ep} (paired)"),
            ViewTarget::Pending(ep) => write!(f, "{ep} (pending, batchlog)"),
        }
    }
}

/// Computes view replicas on behalf of one local node.
pub struct ViewEndpointResolver<'a, R: ?Sized, D: ?Sized, P: ?Sized> {
    local: Endpoint,
    replicas: &'a R,
    snitch: &'a D,
    pending: &'a P,
}

impl<'a, T> ViewEndpointResolver<'a, T, T, T>
where
    T: ReplicaSetProvider + DatacenterResolver + PendingReplicaProvider<Token = <T as ReplicaSetProvider>::Token> + ?Sized,
{
    /// Resolver over a single object serving all three lookups.
    pub fn with_topology(local: Endpoint, topology: &'a T) -> Self {
        Self::new(local, topology, topology, topology)
    }
}

impl<'a, R, D, P> ViewEndpointResolver<'a, R, D, P>
where
    R: ReplicaSetProvider + ?Sized,
    D: DatacenterResolver + ?Sized,
    P: PendingReplicaProvider<Token = R::Token> + ?Sized,
{
    pub fn new(local: Endpoint, replicas: &'a R, snitch: &'a D, pending: &'a P) -> Self {
        Self {
            local,
            replicas,
            snitch,
            pending,
        }
    }

    pub fn local_endpoint(&self) -> Endpoint {
        self.local
    }

    /// View replica the local node must send the view mutation to.
    pub fn resolve(
        &self,
        keyspace: &str,
        base_token: &R::Token,
        view_token: &R::Token,
    ) -> Result<Endpoint, ViewError> {
        self.resolve_target(keyspace, base_token, view_token)
            .map(ViewTarget::into_endpoint)
    }

    /// Like [`resolve`](Self::resolve), but reports which rule picked the
    /// endpoint.
    pub fn resolve_target(
        &self,
        keyspace: &str,
        base_token: &R::Token,
        view_token: &R::Token,
    ) -> Result<ViewTarget, ViewError> {
        let base_replicas = self.replicas.natural_endpoints(keyspace, base_token)?;
        let view_replicas = self.replicas.natural_endpoints(keyspace, view_token)?;

        let result = self.decide(keyspace, base_token, view_token, &base_replicas, &view_replicas);
        match &result {
            Ok(target) => {
                debug!(keyspace, ?base_token, ?view_token, local = %self.local, %target, "resolved view endpoint");
                counter!("view_endpoint_resolutions_total", "outcome" => target.outcome()).increment(1);
            }
            Err(ViewError::NotAReplica { .. }) => {
                counter!("view_endpoint_resolutions_total", "outcome" => "not_a_replica").increment(1);
            }
            Err(ViewError::ReplicationInvariant { .. }) => {
                counter!("view_endpoint_resolutions_total", "outcome" => "invariant_violation").increment(1);
            }
            Err(ViewError::Topology(err)) => {
                warn!(keyspace, %base_token, %view_token, error = %err, "replica lookup failed");
                counter!("view_endpoint_resolutions_total", "outcome" => "topology_error").increment(1);
            }
        }
        result
    }

    /// Overlap-pruned local correspondence for a base/view token pair.
    pub fn pairings(
        &self,
        keyspace: &str,
        base_token: &R::Token,
        view_token: &R::Token,
    ) -> Result<LocalReplicas, ViewError> {
        let base_replicas = self.replicas.natural_endpoints(keyspace, base_token)?;
        let view_replicas = self.replicas.natural_endpoints(keyspace, view_token)?;
        Ok(self.pair(&base_replicas, &view_replicas))
    }

    fn decide(
        &self,
        keyspace: &str,
        base_token: &R::Token,
        view_token: &R::Token,
        base_replicas: &[Endpoint],
        view_replicas: &[Endpoint],
    ) -> Result<ViewTarget, ViewError> {
        if view_replicas.contains(&self.local) {
            return Ok(ViewTarget::SelfReplica(self.local));
        }

        let pairs = self.pair(base_replicas, view_replicas);
        if let Err(err) = pairs.ensure_balanced(keyspace) {
            error!(
                keyspace,
                ?base_token,
                ?view_token,
                base = ?pairs.base(),
                view = ?pairs.view(),
                "local base and view replica counts differ"
            );
            return Err(err);
        }

        if let Some(target) = pairs.counterpart(&self.local) {
            return Ok(ViewTarget::Paired(target));
        }

        let pending = self.pending.pending_endpoints(view_token, keyspace);
        if !pending.is_empty() {
            warn!(
                keyspace,
                ?view_token,
                pending = pending.len(),
                local = %self.local,
                "not a base replica while view token has pending endpoints, writing locally"
            );
            return Ok(ViewTarget::Pending(self.local));
        }

        Err(ViewError::NotAReplica {
            keyspace: keyspace.to_string(),
            base_token: base_token.to_string(),
            endpoint: self.local.to_string(),
        })
    }

    fn pair(&self, base_replicas: &[Endpoint], view_replicas: &[Endpoint]) -> LocalReplicas {
        let local_dc = self.snitch.datacenter_of(&self.local);
        LocalReplicas::pair(base_replicas, view_replicas, |endpoint| {
            self.snitch.datacenter_of(endpoint) == local_dc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::token::Murmur3Token as T;
    use metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    fn ep(last: u8) -> Endpoint {
        format!("10.0.0.{last}").parse().unwrap()
    }

    fn eps(lasts: &[u8]) -> Vec<Endpoint> {
        lasts.iter().copied().map(ep).collect()
    }

    /// Fixed token → replicas table, one datacenter per endpoint.
    #[derive(Default)]
    struct Fixed {
        replicas: HashMap<T, Vec<Endpoint>>,
        datacenters: HashMap<Endpoint, &'static str>,
        pending: HashMap<T, HashSet<Endpoint>>,
    }

    impl Fixed {
        fn with(mut self, token: u64, lasts: &[u8]) -> Self {
            self.replicas.insert(T(token), eps(lasts));
            self
        }

        fn in_dc(mut self, dc: &'static str, lasts: &[u8]) -> Self {
            for e in eps(lasts) {
                self.datacenters.insert(e, dc);
            }
            self
        }

        fn pending(mut self, token: u64, lasts: &[u8]) -> Self {
            self.pending.insert(T(token), eps(lasts).into_iter().collect());
            self
        }
    }

    impl ReplicaSetProvider for Fixed {
        type Token = T;

        fn natural_endpoints(&self, keyspace: &str, token: &T) -> corelib::Result<Vec<Endpoint>> {
            if keyspace != "ks" {
                return Err(corelib::Error::UnknownKeyspace(keyspace.to_string()));
            }
            Ok(self.replicas.get(token).cloned().unwrap_or_default())
        }
    }

    impl DatacenterResolver for Fixed {
        fn datacenter_of(&self, endpoint: &Endpoint) -> String {
            self.datacenters.get(endpoint).copied().unwrap_or("dc1").to_string()
        }
    }

    impl PendingReplicaProvider for Fixed {
        type Token = T;

        fn pending_endpoints(&self, token: &T, _keyspace: &str) -> HashSet<Endpoint> {
            self.pending.get(token).cloned().unwrap_or_default()
        }
    }

    fn resolve(topology: &Fixed, local: u8) -> Result<ViewTarget, ViewError> {
        ViewEndpointResolver::with_topology(ep(local), topology).resolve_target("ks", &T(1), &T(2))
    }

    #[test]
    fn test_paired_by_rank() {
        let topo = Fixed::default().with(1, &[1, 2, 3]).with(2, &[4, 5, 6]);
        assert_eq!(resolve(&topo, 1), Ok(ViewTarget::Paired(ep(4))));
        assert_eq!(resolve(&topo, 2), Ok(ViewTarget::Paired(ep(5))));
        assert_eq!(resolve(&topo, 3), Ok(ViewTarget::Paired(ep(6))));
    }

    #[test]
    fn test_self_replica_short_circuits_regardless_of_rank() {
        let topo = Fixed::default().with(1, &[1, 2, 3]).with(2, &[3, 1, 2]);
        for local in [1, 2, 3] {
            assert_eq!(resolve(&topo, local), Ok(ViewTarget::SelfReplica(ep(local))));
        }
    }

    #[test]
    fn test_self_replica_wins_over_unbalanced_lists() {
        let topo = Fixed::default().with(1, &[1, 2, 3]).with(2, &[7]);
        assert_eq!(resolve(&topo, 7), Ok(ViewTarget::SelfReplica(ep(7))));
    }

    #[test]
    fn test_invariant_violation_is_an_error() {
        let topo = Fixed::default().with(1, &[1, 2, 3]).with(2, &[4, 5]);
        assert_eq!(
            resolve(&topo, 1),
            Err(ViewError::ReplicationInvariant {
                keyspace: "ks".to_string(),
                base: 3,
                view: 2
            })
        );
    }

    #[test]
    fn test_not_a_replica() {
        let topo = Fixed::default().with(1, &[1, 2]).with(2, &[3, 4]);
        let err = resolve(&topo, 9).unwrap_err();
        assert!(matches!(err, ViewError::NotAReplica { ref endpoint, .. } if endpoint == "10.0.0.9:7000"));
        assert_eq!(
            err.to_string(),
            "10.0.0.9:7000 is not a data replica of base token 1 in keyspace ks"
        );
    }

    #[test]
    fn test_pending_fallback_writes_locally() {
        let topo = Fixed::default().with(1, &[1, 2]).with(2, &[3, 4]).pending(2, &[8]);
        let target = resolve(&topo, 9).unwrap();
        assert_eq!(target, ViewTarget::Pending(ep(9)));
        assert!(target.requires_batchlog());
    }

    #[test]
    fn test_pending_on_base_token_does_not_help() {
        let topo = Fixed::default().with(1, &[1, 2]).with(2, &[3, 4]).pending(1, &[8]);
        assert!(matches!(resolve(&topo, 9), Err(ViewError::NotAReplica { .. })));
    }

    #[test]
    fn test_remote_replicas_never_chosen() {
        // 2 and 5 live in dc2; local node 3 is in dc1
        let topo = Fixed::default()
            .with(1, &[1, 2, 3])
            .with(2, &[4, 5, 6])
            .in_dc("dc2", &[2, 5]);
        assert_eq!(resolve(&topo, 3), Ok(ViewTarget::Paired(ep(6))));
        assert_eq!(resolve(&topo, 1), Ok(ViewTarget::Paired(ep(4))));
    }

    #[test]
    fn test_unknown_keyspace_propagates() {
        let topo = Fixed::default();
        let resolver = ViewEndpointResolver::with_topology(ep(1), &topo);
        assert_eq!(
            resolver.resolve("other", &T(1), &T(2)),
            Err(ViewError::Topology(corelib::Error::UnknownKeyspace("other".to_string())))
        );
    }

    /// Records the `outcome` label of every counter increment.
    #[derive(Default)]
    struct Outcomes(Arc<Mutex<Vec<String>>>);

    struct OutcomeCounter {
        outcome: String,
        sink: Arc<Mutex<Vec<String>>>,
    }

    impl CounterFn for OutcomeCounter {
        fn increment(&self, _value: u64) {
            self.sink.lock().unwrap().push(self.outcome.clone());
        }

        fn absolute(&self, _value: u64) {}
    }

    impl Recorder for Outcomes {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let outcome = key
                .labels()
                .find(|label| label.key() == "outcome")
                .map(|label| label.value().to_string())
                .unwrap_or_default();
            Counter::from_arc(Arc::new(OutcomeCounter {
                outcome,
                sink: Arc::clone(&self.0),
            }))
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn outcomes_of(f: impl FnOnce()) -> Vec<String> {
        let recorder = Outcomes::default();
        metrics::with_local_recorder(&recorder, f);
        let seen = recorder.0.lock().unwrap().clone();
        seen
    }

    #[test]
    fn test_every_outcome_is_counted() {
        let topo = Fixed::default().with(1, &[1, 2]).with(2, &[3, 4]);
        let seen = outcomes_of(|| {
            let _ = resolve(&topo, 1);
            let _ = resolve(&topo, 3);
            let _ = resolve(&topo, 9);
            let _ = ViewEndpointResolver::with_topology(ep(1), &topo).resolve("other", &T(1), &T(2));
        });
        assert_eq!(seen, vec!["paired", "self", "not_a_replica", "topology_error"]);
    }

    #[test]
    fn test_separate_collaborators() {
        let topo = Fixed::default().with(1, &[1, 2]).with(2, &[3, 4]);
        let snitch = corelib::PropertySnitch::new();
        let resolver = ViewEndpointResolver::new(ep(2), &topo, &snitch, &topo);
        assert_eq!(resolver.resolve("ks", &T(1), &T(2)), Ok(ep(4)));
        assert_eq!(resolver.local_endpoint(), ep(2));
    }
}
