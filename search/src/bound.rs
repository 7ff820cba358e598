//! Frontier bounding (best-k retention after each insertion step).

use std::num::NonZeroUsize;

use forage_frontier::Frontier;
use tracing::debug;

use crate::error::ConfigError;
use crate::stats::TraversalStats;

/// A validated frontier bound: the maximum number of candidates the frontier
/// may hold after an insertion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound(NonZeroUsize);

impl Bound {
    /// Validate a bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBound`] if `max` is zero.
    pub fn new(max: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(max)
            .map(Self)
            .ok_or(ConfigError::InvalidBound { max })
    }

    /// The bound as a plain count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Insert successors, record the high-water mark, then prune to `bound`.
///
/// Discarded candidates are dropped silently; only the stats record them.
pub(crate) fn insert_bounded<C, Q, I>(
    frontier: &mut Q,
    successors: I,
    bound: Option<Bound>,
    stats: &mut TraversalStats,
) where
    Q: Frontier<C>,
    I: IntoIterator<Item = C>,
{
    let before = frontier.len();
    frontier.insert_all(successors);
    let after = frontier.len();
    stats.candidates_generated += (after.saturating_sub(before)) as u64;
    stats.frontier_high_water = stats.frontier_high_water.max(after);

    let Some(bound) = bound else {
        return;
    };
    if after > bound.get() {
        let pruned = frontier.retain_best(bound.get());
        stats.candidates_pruned += pruned as u64;
        debug!(pruned, max = bound.get(), "frontier pruned");
    }
}
