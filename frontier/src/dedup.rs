//! Visited-set decorator for loop detection.
//!
//! Uses a `BTreeSet`-based visited set (not `HashSet`) so fingerprints only
//! need `Ord`, and iteration order is deterministic.

use std::collections::BTreeSet;

use crate::contract::Frontier;

/// Wraps another frontier and drops candidates whose fingerprint has already
/// been inserted during the current traversal (first-seen-wins).
///
/// - The visited set covers every candidate ever inserted, including ones
///   since popped or discarded by `retain_best` (pruning is irreversible).
/// - `clear` resets the visited set along with the inner frontier.
pub struct DedupFrontier<Q, K, F> {
    inner: Q,
    fingerprint: F,
    visited: BTreeSet<K>,
    duplicates_suppressed: u64,
}

impl<Q, K, F> DedupFrontier<Q, K, F>
where
    K: Ord,
{
    /// Wrap `inner`, fingerprinting candidates with `fingerprint`.
    #[must_use]
    pub fn new<C>(inner: Q, fingerprint: F) -> Self
    where
        F: Fn(&C) -> K,
    {
        Self {
            inner,
            fingerprint,
            visited: BTreeSet::new(),
            duplicates_suppressed: 0,
        }
    }

    /// Check if a fingerprint has been visited.
    #[must_use]
    pub fn is_visited(&self, key: &K) -> bool {
        self.visited.contains(key)
    }

    /// Number of distinct fingerprints seen since the last `clear`.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of insertions dropped as duplicates since the last `clear`.
    #[must_use]
    pub fn duplicates_suppressed(&self) -> u64 {
        self.duplicates_suppressed
    }

    /// Borrow the wrapped frontier.
    #[must_use]
    pub fn inner(&self) -> &Q {
        &self.inner
    }

    /// Unwrap into the inner frontier.
    #[must_use]
    pub fn into_inner(self) -> Q {
        self.inner
    }
}

impl<C, Q, K, F> Frontier<C> for DedupFrontier<Q, K, F>
where
    Q: Frontier<C>,
    K: Ord,
    F: Fn(&C) -> K,
{
    fn clear(&mut self) {
        self.inner.clear();
        self.visited.clear();
        self.duplicates_suppressed = 0;
    }

    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>,
    {
        let mut fresh = Vec::new();
        for candidate in candidates {
            if self.visited.insert((self.fingerprint)(&candidate)) {
                fresh.push(candidate);
            } else {
                self.duplicates_suppressed += 1;
            }
        }
        self.inner.insert_all(fresh);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn pop(&mut self) -> Option<C> {
        self.inner.pop()
    }

    fn pop_up_to(&mut self, n: usize) -> Vec<C> {
        self.inner.pop_up_to(n)
    }

    fn retain_best(&mut self, k: usize) -> usize {
        self.inner.retain_best(k)
    }
}
