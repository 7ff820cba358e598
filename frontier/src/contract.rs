//! Frontier contract trait.

/// An ordered, mutable collection of pending candidates.
///
/// # Contract
///
/// - The order in which [`pop`](Frontier::pop) returns candidates is the
///   policy of the implementation; callers must not assume any other order.
/// - [`retain_best`](Frontier::retain_best) uses the same notion of "best" as
///   `pop`: after `retain_best(k)`, the frontier holds exactly the `k`
///   candidates that `pop` would have returned first (or everything, if it
///   held `k` or fewer).
/// - Discarded candidates are gone; a frontier never resurrects them.
/// - A frontier is owned by one traversal at a time. Implementations need no
///   interior locking.
pub trait Frontier<C> {
    /// Remove every held candidate.
    fn clear(&mut self);

    /// Insert a finite collection of candidates.
    fn insert_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = C>;

    /// Current number of held candidates.
    fn len(&self) -> usize;

    /// Whether the frontier holds no candidates.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return the next candidate per policy.
    fn pop(&mut self) -> Option<C>;

    /// Remove and return up to `n` candidates, in the order `pop` would
    /// return them.
    ///
    /// Returns fewer than `n` if the frontier holds fewer.
    fn pop_up_to(&mut self, n: usize) -> Vec<C> {
        let mut batch = Vec::with_capacity(n.min(self.len()));
        while batch.len() < n {
            let Some(candidate) = self.pop() else {
                break;
            };
            batch.push(candidate);
        }
        batch
    }

    /// Discard all but the best `k` candidates.
    ///
    /// Returns the number of candidates discarded.
    fn retain_best(&mut self, k: usize) -> usize;
}
