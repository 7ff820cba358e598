//! Best-first frontier ordered by a caller-supplied comparator.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::contract::Frontier;

/// Best-first frontier over an arbitrary total order.
///
/// Use this when "better" is a relation between two candidates rather than a
/// key computed from one (e.g. comparing ratios by cross-multiplication).
/// `compare(a, b) == Less` means `a` is polled before `b`. Candidates that
/// compare `Equal` leave in insertion order.
///
/// Candidates are held sorted, so insertion is linear in the frontier size
/// and `pop` is constant.
///
/// ```
/// use forage_frontier::{ComparatorFrontier, Frontier};
///
/// // Longest label first.
/// let mut frontier = ComparatorFrontier::new(|a: &&str, b: &&str| b.len().cmp(&a.len()));
/// frontier.insert_all(["ab", "abcd", "abc"]);
/// assert_eq!(frontier.pop(), Some("abcd"));
/// ```
pub struct ComparatorFrontier<C, F> {
    ordered: VecDeque<C>,
    compare: F,
    high_water: usize,
}

impl<C, F> ComparatorFrontier<C, F>
where
    F: Fn(&C, &C) -> Ordering,
{
    /// Create a new empty frontier ordered by `compare`.
    #[must_use]
    pub fn new(compare: F) -> Self {
        Self {
            ordered: VecDeque::new(),
            compare,
            high_water: 0,
        }
    }

    /// Insert one candidate after every held candidate that is not worse.
    pub fn push(&mut self, candidate: C) {
        let at = self
            .ordered
            .partition_point(|held| (self.compare)(held, &candidate) != Ordering::Greater);
        self.ordered.insert(at, candidate);
    }

    /// Borrow the candidate that `pop` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&C> {
        self.ordered.front()
    }

    /// High-water mark of frontier size since the last `clear`.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<C, F> Frontier<C> for ComparatorFrontier<C, F>
where
    F: Fn(&C, &C) -> Ordering,
{
    fn clear(&mut self) {
        self.ordered.clear();
        self.high_water = 0;
    }

    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>,
    {
        for candidate in candidates {
            self.push(candidate);
        }
        self.high_water = self.high_water.max(self.ordered.len());
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    fn pop(&mut self) -> Option<C> {
        self.ordered.pop_front()
    }

    fn pop_up_to(&mut self, n: usize) -> Vec<C> {
        let take = n.min(self.ordered.len());
        self.ordered.drain(..take).collect()
    }

    fn retain_best(&mut self, k: usize) -> usize {
        let discarded = self.ordered.len().saturating_sub(k);
        self.ordered.truncate(k);
        discarded
    }
}

impl<C, F> std::fmt::Debug for ComparatorFrontier<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorFrontier")
            .field("len", &self.ordered.len())
            .field("high_water", &self.high_water)
            .finish_non_exhaustive()
    }
}
