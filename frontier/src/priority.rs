//! Best-first frontier ordered by a caller-supplied key.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::contract::Frontier;

/// The frontier ordering key: `(priority, insertion_order)`.
///
/// Lower priority first, then older insertion order, so equal-priority
/// candidates leave in FIFO order and retrieval is fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct EntryKey<K> {
    priority: K,
    insertion_order: u64,
}

/// A frontier entry wrapping a candidate with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<EntryKey>` to get
/// min-heap behavior (lowest priority first).
#[derive(Debug)]
struct Entry<C, K> {
    key: Reverse<EntryKey<K>>,
    candidate: C,
}

impl<C, K: Ord> PartialEq for Entry<C, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<C, K: Ord> Eq for Entry<C, K> {}

impl<C, K: Ord> PartialOrd for Entry<C, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C, K: Ord> Ord for Entry<C, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier.
///
/// The key function is evaluated once per candidate at insertion time. The
/// candidate with the *lowest* key is polled first; wrap the key in
/// [`Reverse`] for highest-first.
///
/// ```
/// use forage_frontier::{Frontier, PriorityFrontier};
///
/// let mut frontier = PriorityFrontier::new(|n: &u32| *n);
/// frontier.insert_all([30, 10, 20]);
/// assert_eq!(frontier.pop(), Some(10));
/// ```
pub struct PriorityFrontier<C, K, F> {
    heap: BinaryHeap<Entry<C, K>>,
    key_fn: F,
    next_insertion_order: u64,
    high_water: usize,
}

impl<C, K, F> PriorityFrontier<C, K, F>
where
    K: Ord,
    F: Fn(&C) -> K,
{
    /// Create a new empty frontier ordered by `key_fn`.
    #[must_use]
    pub fn new(key_fn: F) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key_fn,
            next_insertion_order: 0,
            high_water: 0,
        }
    }

    /// Insert one candidate.
    pub fn push(&mut self, candidate: C) {
        let key = EntryKey {
            priority: (self.key_fn)(&candidate),
            insertion_order: self.next_insertion_order,
        };
        self.next_insertion_order += 1;
        self.heap.push(Entry {
            key: Reverse(key),
            candidate,
        });
    }

    /// Borrow the candidate that `pop` would return next.
    #[must_use]
    pub fn peek(&self) -> Option<&C> {
        self.heap.peek().map(|e| &e.candidate)
    }

    /// High-water mark of frontier size since the last `clear`.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<C, K, F> Frontier<C> for PriorityFrontier<C, K, F>
where
    K: Ord,
    F: Fn(&C) -> K,
{
    fn clear(&mut self) {
        self.heap.clear();
        self.next_insertion_order = 0;
        self.high_water = 0;
    }

    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>,
    {
        for candidate in candidates {
            self.push(candidate);
        }
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn pop(&mut self) -> Option<C> {
        self.heap.pop().map(|e| e.candidate)
    }

    fn retain_best(&mut self, k: usize) -> usize {
        if self.heap.len() <= k {
            return 0;
        }

        // Drain all entries, sort ascending by the raw key (best first),
        // keep the first k.
        let mut entries: Vec<Entry<C, K>> = self.heap.drain().collect();
        entries.sort_by(|a, b| a.key.0.cmp(&b.key.0));
        let discarded = entries.len() - k;
        entries.truncate(k);
        self.heap = entries.into_iter().collect();

        discarded
    }
}

impl<C, K, F> std::fmt::Debug for PriorityFrontier<C, K, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityFrontier")
            .field("len", &self.heap.len())
            .field("next_insertion_order", &self.next_insertion_order)
            .field("high_water", &self.high_water)
            .finish_non_exhaustive()
    }
}
