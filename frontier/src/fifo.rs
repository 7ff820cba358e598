//! First-in, first-out frontier (breadth-first exploration).

use std::collections::VecDeque;

use crate::contract::Frontier;

/// Queue frontier: candidates leave in insertion order.
///
/// "Best" for [`Frontier::retain_best`] means "closest to the head of the
/// queue", so bounding keeps the candidates that would be polled next.
#[derive(Debug, Clone)]
pub struct FifoFrontier<C> {
    queue: VecDeque<C>,
    high_water: usize,
}

impl<C> FifoFrontier<C> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            high_water: 0,
        }
    }

    /// High-water mark of frontier size since the last `clear`.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Iterate held candidates in polling order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.queue.iter()
    }
}

impl<C> Default for FifoFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Frontier<C> for FifoFrontier<C> {
    fn clear(&mut self) {
        self.queue.clear();
        self.high_water = 0;
    }

    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>,
    {
        self.queue.extend(candidates);
        self.high_water = self.high_water.max(self.queue.len());
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn pop(&mut self) -> Option<C> {
        self.queue.pop_front()
    }

    fn pop_up_to(&mut self, n: usize) -> Vec<C> {
        let take = n.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    fn retain_best(&mut self, k: usize) -> usize {
        let discarded = self.queue.len().saturating_sub(k);
        self.queue.truncate(k);
        discarded
    }
}
