//! Rank correspondence between local base and local view replicas.
//!
//! Given the natural replicas of a base token and of a view token, keep the
//! ones in the local datacenter and drop every endpoint that replicates both
//! tokens (such a node writes its view update to itself, so it takes no part
//! in the pairing on either side). What is left on each side is paired by
//! position: the n-th remaining base replica writes to the n-th remaining
//! view replica.
//!
//! Shared endpoints are tracked as a multiset, so the scan is linear in the
//! two replica lists.

use std::collections::HashMap;

use corelib::Endpoint;

use crate::error::ViewError;

/// Overlap-pruned, locality-filtered base and view replicas in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReplicas {
    base: Vec<Endpoint>,
    view: Vec<Endpoint>,
}

impl LocalReplicas {
    /// Pair `base_replicas` with `view_replicas`.
    ///
    /// `in_local_dc` decides locality for both sides. A view endpoint that is
    /// also a local base replica consumes one occurrence of it on the base
    /// side and is never added to the view side, whatever its datacenter.
    pub fn pair<F>(base_replicas: &[Endpoint], view_replicas: &[Endpoint], in_local_dc: F) -> Self
    where
        F: Fn(&Endpoint) -> bool,
    {
        let local_base: Vec<&Endpoint> = base_replicas.iter().filter(|e| in_local_dc(*e)).collect();

        let mut unclaimed: HashMap<&Endpoint, usize> = HashMap::with_capacity(local_base.len());
        for endpoint in &local_base {
            *unclaimed.entry(*endpoint).or_insert(0) += 1;
        }

        let mut shared: HashMap<&Endpoint, usize> = HashMap::new();
        let mut view = Vec::with_capacity(view_replicas.len());
        for endpoint in view_replicas {
            match unclaimed.get_mut(endpoint) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    *shared.entry(endpoint).or_insert(0) += 1;
                }
                _ => {
                    if in_local_dc(endpoint) {
                        view.push(*endpoint);
                    }
                }
            }
        }

        let base = local_base
            .into_iter()
            .filter(|endpoint| match shared.get_mut(*endpoint) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    false
                }
                _ => true,
            })
            .copied()
            .collect();

        Self { base, view }
    }

    pub fn base(&self) -> &[Endpoint] {
        &self.base
    }

    pub fn view(&self) -> &[Endpoint] {
        &self.view
    }

    /// Both sides must hold the same number of replicas: they come from one
    /// strategy with one per-datacenter replication factor.
    pub fn ensure_balanced(&self, keyspace: &str) -> Result<(), ViewError> {
        if self.base.len() == self.view.len() {
            return Ok(());
        }
        Err(ViewError::ReplicationInvariant {
            keyspace: keyspace.to_string(),
            base: self.base.len(),
            view: self.view.len(),
        })
    }

    /// View replica at the same rank as `endpoint` among base replicas.
    pub fn counterpart(&self, endpoint: &Endpoint) -> Option<Endpoint> {
        let idx = self.base.iter().position(|base| base == endpoint)?;
        self.view.get(idx).copied()
    }

    /// `(base, view)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&Endpoint, &Endpoint)> {
        self.base.iter().zip(self.view.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(last: u8) -> Endpoint {
        format!("10.0.0.{last}").parse().unwrap()
    }

    fn eps(lasts: &[u8]) -> Vec<Endpoint> {
        lasts.iter().copied().map(ep).collect()
    }

    fn everywhere(_: &Endpoint) -> bool {
        true
    }

    #[test]
    fn test_disjoint_sets_pair_by_rank() {
        let pairs = LocalReplicas::pair(&eps(&[1, 2, 3]), &eps(&[4, 5, 6]), everywhere);
        assert_eq!(pairs.counterpart(&ep(1)), Some(ep(4)));
        assert_eq!(pairs.counterpart(&ep(2)), Some(ep(5)));
        assert_eq!(pairs.counterpart(&ep(3)), Some(ep(6)));
        assert!(pairs.ensure_balanced("ks").is_ok());
    }

    #[test]
    fn test_shared_endpoints_dropped_from_both_sides() {
        let pairs = LocalReplicas::pair(&eps(&[1, 2, 3]), &eps(&[3, 4, 5]), everywhere);
        assert_eq!(pairs.base(), eps(&[1, 2]).as_slice());
        assert_eq!(pairs.view(), eps(&[4, 5]).as_slice());
        assert_eq!(pairs.counterpart(&ep(3)), None);
    }

    #[test]
    fn test_rotated_sets_fully_overlap() {
        // {A,B,C} vs {C,A,B}: every node replicates both tokens
        let pairs = LocalReplicas::pair(&eps(&[1, 2, 3]), &eps(&[3, 1, 2]), everywhere);
        assert!(pairs.base().is_empty());
        assert!(pairs.view().is_empty());
        assert!(pairs.ensure_balanced("ks").is_ok());
    }

    #[test]
    fn test_remote_endpoints_ignored() {
        let local = |e: &Endpoint| *e != ep(2) && *e != ep(5);
        let pairs = LocalReplicas::pair(&eps(&[1, 2, 3]), &eps(&[4, 5, 6]), local);
        assert_eq!(pairs.base(), eps(&[1, 3]).as_slice());
        assert_eq!(pairs.view(), eps(&[4, 6]).as_slice());
        assert_eq!(pairs.counterpart(&ep(3)), Some(ep(6)));
        assert_eq!(pairs.counterpart(&ep(2)), None);
    }

    #[test]
    fn test_shared_remote_endpoint_not_pruned() {
        // 2 is remote: not a local base replica, so as a view replica it is
        // simply filtered out
        let local = |e: &Endpoint| *e != ep(2);
        let pairs = LocalReplicas::pair(&eps(&[1, 2]), &eps(&[2, 3]), local);
        assert_eq!(pairs.base(), eps(&[1]).as_slice());
        assert_eq!(pairs.view(), eps(&[3]).as_slice());
    }

    #[test]
    fn test_unbalanced_lists_rejected() {
        let pairs = LocalReplicas::pair(&eps(&[1, 2, 3]), &eps(&[4, 5]), everywhere);
        assert_eq!(
            pairs.ensure_balanced("ks"),
            Err(ViewError::ReplicationInvariant {
                keyspace: "ks".to_string(),
                base: 3,
                view: 2
            })
        );
    }

    #[test]
    fn test_duplicate_view_entry_claims_once() {
        // Second occurrence of 1 finds nothing left to claim and lands on
        // the view side
        let pairs = LocalReplicas::pair(&eps(&[1, 2]), &eps(&[1, 1, 3]), everywhere);
        assert_eq!(pairs.base(), eps(&[2]).as_slice());
        assert_eq!(pairs.view(), eps(&[1, 3]).as_slice());
    }

    #[test]
    fn test_iter_pairs() {
        let pairs = LocalReplicas::pair(&eps(&[1, 2]), &eps(&[3, 4]), everywhere);
        let collected: Vec<_> = pairs.iter().map(|(b, v)| (*b, *v)).collect();
        assert_eq!(collected, vec![(ep(1), ep(3)), (ep(2), ep(4))]);
    }
}
