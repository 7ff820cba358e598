//! Synchronous explorer: a single-threaded pull loop over one frontier.
//!
//! # Loop
//!
//! ```text
//! traverse(): clear frontier → insert start set
//! next():     pop c → space(c) → insert successors → retain_best(max) → yield c
//! ```
//!
//! Work happens only inside `next()`. Dropping the [`Traversal`] (or simply
//! not calling `next()` again) stops the loop: no further pops or expansions
//! occur after the consumer disengages.

use forage_frontier::Frontier;
use tracing::{debug, trace, warn};

use crate::bound::{insert_bounded, Bound};
use crate::error::{BoxError, ConfigError, ExploreError};
use crate::policy::ExplorePolicy;
use crate::stats::TraversalStats;

/// Boxed synchronous expansion function.
type SpaceFn<C> = Box<dyn FnMut(&C) -> Result<Option<Vec<C>>, BoxError>>;

/// Synchronous frontier explorer.
///
/// Configured fluently, then traversed any number of times. Every call to
/// [`traverse`](Explorer::traverse) clears and reseeds the frontier, so
/// repeated traversals with a deterministic space and frontier produce the
/// same sequence.
///
/// ```
/// use forage_frontier::FifoFrontier;
/// use forage_search::Explorer;
///
/// let mut explorer = Explorer::new(FifoFrontier::new())
///     .start([1u64])
///     .space(|n: &u64| Some([n + 1, n + 2]));
///
/// let first: Vec<u64> = explorer.traverse().take(5).map(Result::unwrap).collect();
/// assert_eq!(first, vec![1, 2, 3, 3, 4]);
/// ```
pub struct Explorer<C, Q> {
    start: Vec<C>,
    space: Option<SpaceFn<C>>,
    frontier: Q,
    bound: Option<Bound>,
    stats: TraversalStats,
}

impl<C, Q> Explorer<C, Q>
where
    Q: Frontier<C>,
{
    /// Create an explorer over `frontier` with no start set, no space and
    /// no bound.
    #[must_use]
    pub fn new(frontier: Q) -> Self {
        Self {
            start: Vec::new(),
            space: None,
            frontier,
            bound: None,
            stats: TraversalStats::default(),
        }
    }

    /// Replace the start candidates.
    #[must_use]
    pub fn start<I>(mut self, start: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        self.start = start.into_iter().collect();
        self
    }

    /// Set an infallible expansion function.
    ///
    /// Returning `None` means "do not expand this candidate"; it is treated
    /// exactly like an empty successor list.
    #[must_use]
    pub fn space<F, I>(self, mut space: F) -> Self
    where
        F: FnMut(&C) -> Option<I> + 'static,
        I: IntoIterator<Item = C>,
    {
        self.try_space(move |candidate: &C| Ok(space(candidate)))
    }

    /// Set a fallible expansion function.
    ///
    /// An `Err` halts the traversal with [`ExploreError::Expansion`].
    #[must_use]
    pub fn try_space<F, I>(mut self, mut space: F) -> Self
    where
        F: FnMut(&C) -> Result<Option<I>, BoxError> + 'static,
        I: IntoIterator<Item = C>,
    {
        self.space = Some(Box::new(move |candidate: &C| {
            space(candidate).map(|expansion| {
                expansion.map(|successors| successors.into_iter().collect::<Vec<C>>())
            })
        }));
        self
    }

    /// Swap in a different frontier instance (and possibly policy type).
    #[must_use]
    pub fn frontier<R>(self, frontier: R) -> Explorer<C, R>
    where
        R: Frontier<C>,
    {
        Explorer {
            start: self.start,
            space: self.space,
            frontier,
            bound: self.bound,
            stats: TraversalStats::default(),
        }
    }

    /// Cap the frontier at `max` candidates after every insertion step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBound`] if `max` is zero.
    pub fn bound(mut self, max: usize) -> Result<Self, ConfigError> {
        self.bound = Some(Bound::new(max)?);
        Ok(self)
    }

    /// Remove any frontier bound.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.bound = None;
        self
    }

    /// Apply the bound from a policy. `cores` is ignored.
    ///
    /// `max_frontier: None` keeps the current bound; use
    /// [`unbounded`](Explorer::unbounded) to remove one.
    ///
    /// # Errors
    ///
    /// Returns any error [`ExplorePolicy::validate`] reports.
    pub fn policy(mut self, policy: &ExplorePolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        if let Some(bound) = policy.bound()? {
            self.bound = Some(bound);
        }
        Ok(self)
    }

    /// Borrow the frontier (e.g. to inspect what a halted traversal left).
    #[must_use]
    pub fn current_frontier(&self) -> &Q {
        &self.frontier
    }

    /// Counters of the most recent traversal.
    #[must_use]
    pub fn last_stats(&self) -> TraversalStats {
        self.stats
    }

    /// Start a fresh traversal: clear the frontier and reseed it with the
    /// start candidates.
    ///
    /// The traversal borrows the explorer mutably, so the frontier is owned
    /// by exactly one traversal at a time.
    pub fn traverse(&mut self) -> Traversal<'_, C, Q>
    where
        C: Clone,
    {
        self.stats = TraversalStats::default();
        self.frontier.clear();
        insert_bounded(
            &mut self.frontier,
            self.start.iter().cloned(),
            self.bound,
            &mut self.stats,
        );
        debug!(
            start = self.start.len(),
            max = self.bound.map(Bound::get),
            "traversal started"
        );

        Traversal {
            frontier: &mut self.frontier,
            space: self.space.as_mut(),
            bound: self.bound,
            stats: &mut self.stats,
            finished: false,
        }
    }
}

impl<C, Q> Default for Explorer<C, Q>
where
    Q: Frontier<C> + Default,
{
    fn default() -> Self {
        Self::new(Q::default())
    }
}

/// One lazy pass over the explorer's frontier.
///
/// Yields `Ok(candidate)` for each visited candidate. A fault is yielded once
/// as `Err`, after which the traversal is finished.
pub struct Traversal<'a, C, Q> {
    frontier: &'a mut Q,
    space: Option<&'a mut SpaceFn<C>>,
    bound: Option<Bound>,
    stats: &'a mut TraversalStats,
    finished: bool,
}

impl<C, Q> Traversal<'_, C, Q> {
    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> TraversalStats {
        *self.stats
    }

    /// Borrow the live frontier between pulls.
    #[must_use]
    pub fn frontier(&self) -> &Q {
        self.frontier
    }
}

impl<C, Q> Iterator for Traversal<'_, C, Q>
where
    Q: Frontier<C>,
{
    type Item = Result<C, ExploreError<C>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(candidate) = self.frontier.pop() else {
            self.finished = true;
            debug!(
                expansions = self.stats.expansions,
                pruned = self.stats.candidates_pruned,
                high_water = self.stats.frontier_high_water,
                "frontier exhausted"
            );
            return None;
        };

        // No space configured: every candidate is a leaf.
        let expansion = match self.space.as_mut() {
            None => None,
            Some(space) => match space(&candidate) {
                Ok(expansion) => {
                    self.stats.expansions += 1;
                    expansion
                }
                Err(source) => {
                    self.finished = true;
                    warn!(
                        error = %source,
                        frontier = self.frontier.len(),
                        "expansion failed; traversal halted"
                    );
                    return Some(Err(ExploreError::Expansion { candidate, source }));
                }
            },
        };

        if let Some(successors) = expansion {
            trace!(successors = successors.len(), "candidate expanded");
            insert_bounded(&mut *self.frontier, successors, self.bound, self.stats);
        }

        Some(Ok(candidate))
    }
}

impl<C, Q> std::iter::FusedIterator for Traversal<'_, C, Q> where Q: Frontier<C> {}
