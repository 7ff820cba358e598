//! Last-in, first-out frontier (depth-first exploration).

use crate::contract::Frontier;

/// Stack frontier: the most recently inserted candidate leaves first.
///
/// Within one `insert_all` call, candidates are pushed in iteration order, so
/// the last element of the batch is polled first.
#[derive(Debug, Clone)]
pub struct LifoFrontier<C> {
    stack: Vec<C>,
    high_water: usize,
}

impl<C> LifoFrontier<C> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            high_water: 0,
        }
    }

    /// High-water mark of frontier size since the last `clear`.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<C> Default for LifoFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Frontier<C> for LifoFrontier<C> {
    fn clear(&mut self) {
        self.stack.clear();
        self.high_water = 0;
    }

    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>,
    {
        self.stack.extend(candidates);
        self.high_water = self.high_water.max(self.stack.len());
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn pop(&mut self) -> Option<C> {
        self.stack.pop()
    }

    // Best = top of the stack; the bottom is discarded.
    fn retain_best(&mut self, k: usize) -> usize {
        let discarded = self.stack.len().saturating_sub(k);
        self.stack.drain(..discarded);
        discarded
    }
}
