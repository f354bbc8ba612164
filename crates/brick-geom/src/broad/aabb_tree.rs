// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::types::aabb::Aabb;
use std::collections::BTreeMap;

/// Broad-phase interface for inserting proxies and querying overlapping pairs.
///
/// Implementations must return pairs deterministically: the pair `(a, b)` is
/// canonicalized such that `a < b`, and the full list is sorted ascending.
pub trait BroadPhase<K> {
    /// Inserts or updates the proxy with the given `key` and `aabb`.
    fn upsert(&mut self, key: K, aabb: Aabb);
    /// Removes a proxy if present.
    fn remove(&mut self, key: &K);
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&self) -> Vec<(K, K)>;
}

/// All-pairs AABB broad-phase.
///
/// A brick scene holds tens of trigger volumes near the player's hands, so
/// the `O(n^2)` sweep is adequate; keys are kept in a `BTreeMap` so the pair
/// list comes out already sorted.
#[derive(Debug, Clone)]
pub struct AabbTree<K> {
    items: BTreeMap<K, Aabb>,
}

impl<K> Default for AabbTree<K> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> AabbTree<K> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proxies currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no proxies are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every proxy.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<K: Ord + Copy> BroadPhase<K> for AabbTree<K> {
    fn upsert(&mut self, key: K, aabb: Aabb) {
        self.items.insert(key, aabb);
    }

    fn remove(&mut self, key: &K) {
        self.items.remove(key);
    }

    fn pairs(&self) -> Vec<(K, K)> {
        let items: Vec<(&K, &Aabb)> = self.items.iter().collect();
        let mut out = Vec::new();
        for (i, (a_key, a_bb)) in items.iter().enumerate() {
            for (b_key, b_bb) in items.iter().skip(i + 1) {
                if a_bb.overlaps(b_bb) {
                    // canonical since BTreeMap order gives a_key < b_key
                    out.push((**a_key, **b_key));
                }
            }
        }
        out
    }
}
