//! Asynchronous explorer: batch-at-a-time expansion with bounded fan-out.
//!
//! # Loop
//!
//! ```text
//! traverse(): clear frontier → resolve start set → insert
//! per batch:  resolve width w → pop_up_to(w) → expand all concurrently (join)
//!             → merge successors in batch order → retain_best(max)
//!             → yield batch members in batch order
//! ```
//!
//! Batch *k* is fully expanded and merged before batch *k + 1* is pulled.
//! Within a batch, expansions run concurrently and may complete in any order;
//! their successors are still merged in batch order.
//!
//! The orchestrating loop is the only code that touches the frontier.
//! Expansion futures receive an owned candidate and return data; they never
//! see the frontier, so it needs no locking.
//!
//! Dropping the stream stops further batch pulls. Expansion futures of a
//! batch still in flight at that moment are dropped with the stream.

use std::collections::VecDeque;
use std::future::Future;

use forage_frontier::Frontier;
use futures::future::{join_all, BoxFuture};
use futures::stream::{self, Stream};
use futures::{FutureExt, TryFutureExt};
use tracing::{debug, trace, warn};

use crate::bound::{insert_bounded, Bound};
use crate::concurrency::Concurrency;
use crate::error::{BatchFailure, BoxError, ConfigError, ExploreError};
use crate::policy::ExplorePolicy;
use crate::stats::TraversalStats;

/// Boxed asynchronous expansion function.
type AsyncSpaceFn<C> =
    Box<dyn Fn(C) -> BoxFuture<'static, Result<Option<Vec<C>>, BoxError>> + Send + Sync>;

/// Boxed deferred start-set source.
type StartFn<C> = Box<dyn Fn() -> BoxFuture<'static, Result<Vec<C>, BoxError>> + Send + Sync>;

/// Where the start candidates of a traversal come from.
enum StartSet<C> {
    Ready(Vec<C>),
    Deferred(StartFn<C>),
}

/// Asynchronous frontier explorer.
///
/// ```
/// use forage_frontier::FifoFrontier;
/// use forage_search::{AsyncExplorer, BoxError};
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let mut explorer = AsyncExplorer::new(FifoFrontier::new())
///     .start([1u64])
///     .cores(2)
///     .space(|n: u64| async move { Ok::<_, BoxError>(Some([n + 1, n + 2])) });
///
/// let first: Vec<u64> = explorer
///     .traverse()
///     .take(5)
///     .map(Result::unwrap)
///     .collect()
///     .await;
/// assert_eq!(first, vec![1, 2, 3, 3, 4]);
/// # });
/// ```
pub struct AsyncExplorer<C, Q> {
    start: StartSet<C>,
    space: Option<AsyncSpaceFn<C>>,
    frontier: Q,
    bound: Option<Bound>,
    concurrency: Concurrency,
    stats: TraversalStats,
}

impl<C, Q> AsyncExplorer<C, Q>
where
    C: Send + 'static,
    Q: Frontier<C>,
{
    /// Create an explorer over `frontier` with no start set, no space, no
    /// bound, and one batch slot per available hardware thread.
    #[must_use]
    pub fn new(frontier: Q) -> Self {
        Self {
            start: StartSet::Ready(Vec::new()),
            space: None,
            frontier,
            bound: None,
            concurrency: Concurrency::default(),
            stats: TraversalStats::default(),
        }
    }

    /// Replace the start candidates with an already-resolved set.
    #[must_use]
    pub fn start<I>(mut self, start: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        self.start = StartSet::Ready(start.into_iter().collect());
        self
    }

    /// Replace the start candidates with a deferred source.
    ///
    /// `source` is invoked once per traversal and fully resolved before the
    /// first batch is pulled.
    #[must_use]
    pub fn start_with<F, Fut>(mut self, source: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<C>, BoxError>> + Send + 'static,
    {
        self.start = StartSet::Deferred(Box::new(move || source().boxed()));
        self
    }

    /// Set the expansion function.
    ///
    /// Each invocation receives an owned candidate so the returned future can
    /// be shipped to another task or a remote worker. `Ok(None)` means "do
    /// not expand"; it is treated exactly like an empty successor list.
    #[must_use]
    pub fn space<F, Fut, I>(mut self, space: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<I>, BoxError>> + Send + 'static,
        I: IntoIterator<Item = C>,
    {
        self.space = Some(Box::new(move |candidate: C| {
            space(candidate)
                .map_ok(|expansion| {
                    expansion.map(|successors| successors.into_iter().collect::<Vec<C>>())
                })
                .boxed()
        }));
        self
    }

    /// Swap in a different frontier instance (and possibly policy type).
    #[must_use]
    pub fn frontier<R>(self, frontier: R) -> AsyncExplorer<C, R>
    where
        R: Frontier<C>,
    {
        AsyncExplorer {
            start: self.start,
            space: self.space,
            frontier,
            bound: self.bound,
            concurrency: self.concurrency,
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

    /// Expand at most `width` candidates per batch (0 is treated as 1).
    #[must_use]
    pub fn cores(mut self, width: usize) -> Self {
        self.concurrency = Concurrency::Fixed(width);
        self
    }

    /// Set a fixed or dynamically resolved concurrency width.
    #[must_use]
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Apply bound and width from a policy.
    ///
    /// A field left as `None` keeps the explorer's current setting.
    ///
    /// # Errors
    ///
    /// Returns any error [`ExplorePolicy::validate`] reports.
    pub fn policy(mut self, policy: &ExplorePolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        if let Some(bound) = policy.bound()? {
            self.bound = Some(bound);
        }
        if let Some(cores) = policy.cores {
            self.concurrency = Concurrency::Fixed(cores);
        }
        Ok(self)
    }

    /// Borrow the frontier (e.g. to inspect what a halted traversal left).
    #[must_use]
    pub fn current_frontier(&self) -> &Q {
        &self.frontier
    }

    /// Counters of the most recent traversal (complete once its stream has
    /// been drained or dropped).
    #[must_use]
    pub fn last_stats(&self) -> TraversalStats {
        self.stats
    }

    /// Start a fresh traversal.
    ///
    /// Nothing happens until the stream is polled: the frontier is cleared
    /// and reseeded on the first poll. The stream borrows the explorer
    /// mutably, so the frontier is owned by exactly one traversal at a time.
    pub fn traverse(&mut self) -> impl Stream<Item = Result<C, ExploreError<C>>> + '_
    where
        C: Clone,
    {
        let cursor = Cursor {
            frontier: &mut self.frontier,
            space: self.space.as_ref(),
            start: &self.start,
            concurrency: &self.concurrency,
            bound: self.bound,
            stats: &mut self.stats,
            ready: VecDeque::new(),
            phase: Phase::Seeding,
        };
        stream::unfold(cursor, Cursor::advance)
    }
}

impl<C, Q> Default for AsyncExplorer<C, Q>
where
    C: Send + 'static,
    Q: Frontier<C> + Default,
{
    fn default() -> Self {
        Self::new(Q::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seeding,
    Running,
    Finished,
}

/// Loop state threaded through `stream::unfold`.
struct Cursor<'a, C, Q> {
    frontier: &'a mut Q,
    space: Option<&'a AsyncSpaceFn<C>>,
    start: &'a StartSet<C>,
    concurrency: &'a Concurrency,
    bound: Option<Bound>,
    stats: &'a mut TraversalStats,
    /// Members of the consumed batch not yet yielded.
    ready: VecDeque<C>,
    phase: Phase,
}

impl<C, Q> Cursor<'_, C, Q>
where
    C: Clone + Send + 'static,
    Q: Frontier<C>,
{
    async fn advance(mut self) -> Option<(Result<C, ExploreError<C>>, Self)> {
        loop {
            if let Some(candidate) = self.ready.pop_front() {
                return Some((Ok(candidate), self));
            }

            match self.phase {
                Phase::Finished => return None,
                Phase::Seeding => {
                    if let Err(err) = self.seed().await {
                        self.phase = Phase::Finished;
                        warn!(error = %err, "start set resolution failed");
                        return Some((Err(ExploreError::Start { source: err }), self));
                    }
                    self.phase = Phase::Running;
                }
                Phase::Running => {
                    if self.frontier.is_empty() {
                        self.phase = Phase::Finished;
                        debug!(
                            batches = self.stats.batches,
                            expansions = self.stats.expansions,
                            pruned = self.stats.candidates_pruned,
                            high_water = self.stats.frontier_high_water,
                            "frontier exhausted"
                        );
                        return None;
                    }
                    if let Err(err) = self.run_batch().await {
                        self.phase = Phase::Finished;
                        return Some((Err(err), self));
                    }
                }
            }
        }
    }

    async fn seed(&mut self) -> Result<(), BoxError> {
        *self.stats = TraversalStats::default();
        self.frontier.clear();
        let start = match self.start {
            StartSet::Ready(start) => start.clone(),
            StartSet::Deferred(source) => source().await?,
        };
        debug!(
            start = start.len(),
            max = self.bound.map(Bound::get),
            "traversal started"
        );
        insert_bounded(&mut *self.frontier, start, self.bound, self.stats);
        Ok(())
    }

    /// Pull, expand and merge one batch, leaving its members in `ready`.
    async fn run_batch(&mut self) -> Result<(), ExploreError<C>> {
        let width = match self.concurrency.resolve().await {
            Ok(width) => width,
            Err(source) => {
                warn!(error = %source, "concurrency width resolution failed");
                return Err(ExploreError::Concurrency { source });
            }
        };

        let batch = self.frontier.pop_up_to(width);
        self.stats.batches += 1;
        debug!(
            batch = batch.len(),
            width,
            remaining = self.frontier.len(),
            "batch pulled"
        );

        let Some(space) = self.space else {
            // No space configured: every candidate is a leaf.
            self.ready.extend(batch);
            return Ok(());
        };

        match expand_batch(space, &batch).await {
            Ok(successors) => {
                self.stats.expansions += batch.len() as u64;
                trace!(successors = successors.len(), "batch expanded");
                insert_bounded(&mut *self.frontier, successors, self.bound, self.stats);
                self.ready.extend(batch);
                Ok(())
            }
            Err(failures) => {
                warn!(
                    failed = failures.len(),
                    batch = batch.len(),
                    "batch expansion failed; traversal halted"
                );
                Err(ExploreError::BatchExpansion { batch, failures })
            }
        }
    }
}

/// Expand every batch member concurrently and wait for all of them.
///
/// On success, returns the successors flattened in batch order. If any member
/// fails, returns every failure and discards the successes.
async fn expand_batch<C>(
    space: &AsyncSpaceFn<C>,
    batch: &[C],
) -> Result<Vec<C>, Vec<BatchFailure>>
where
    C: Clone,
{
    let outcomes = join_all(batch.iter().cloned().map(space)).await;

    let mut successors = Vec::new();
    let mut failures = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(Some(expansion)) => successors.extend(expansion),
            Ok(None) => {}
            Err(source) => failures.push(BatchFailure { index, source }),
        }
    }

    if failures.is_empty() {
        Ok(successors)
    } else {
        Err(failures)
    }
}
