//! Lock tests for the synchronous explorer: ordering, bounding,
//! no-expansion absorption, empty start, fault propagation, early
//! termination, and idempotent configuration.

use std::cell::Cell as Counter;
use std::rc::Rc;

use forage_frontier::{
    ComparatorFrontier, DedupFrontier, FifoFrontier, Frontier, LifoFrontier, PriorityFrontier,
};
use forage_search::{ConfigError, ExploreError, ExplorePolicy, Explorer};
use lock_tests::{distance_to_goal, fork, lattice_neighbors, Cell, LATTICE_GOAL, LATTICE_SIDE};

fn first_n<I>(traversal: I, n: usize) -> Vec<u64>
where
    I: Iterator<Item = Result<u64, ExploreError<u64>>>,
{
    traversal
        .take(n)
        .collect::<Result<_, _>>()
        .expect("traversal should not fault")
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn fifo_frontier_yields_breadth_first() {
    let mut explorer = Explorer::new(FifoFrontier::new()).start([1]).space(fork);
    assert_eq!(first_n(explorer.traverse(), 5), vec![1, 2, 3, 3, 4]);
}

#[test]
fn lifo_frontier_yields_depth_first() {
    let mut explorer = Explorer::new(LifoFrontier::new()).start([1]).space(fork);
    assert_eq!(first_n(explorer.traverse(), 5), vec![1, 3, 5, 7, 9]);
}

#[test]
fn priority_frontier_yields_best_first() {
    let frontier = DedupFrontier::new(PriorityFrontier::new(distance_to_goal), |c: &Cell| *c);
    let mut explorer = Explorer::new(frontier)
        .start([(0, 0)])
        .space(lattice_neighbors);

    let path: Vec<Cell> = explorer
        .traverse()
        .map(Result::unwrap)
        .take_while(|cell| *cell != LATTICE_GOAL)
        .collect();

    // Greedy best-first on an open lattice never backtracks: every step
    // moves one cell closer to the goal.
    let side = usize::try_from(LATTICE_SIDE).unwrap();
    assert_eq!(path.len(), 2 * (side - 1));
    for pair in path.windows(2) {
        assert_eq!(distance_to_goal(&pair[1]), distance_to_goal(&pair[0]) - 1);
    }
}

#[test]
fn comparator_frontier_yields_comparator_order() {
    // Highest label first, and a bound of 2 keeps the two highest.
    let mut explorer = Explorer::new(ComparatorFrontier::new(|a: &u64, b: &u64| b.cmp(a)))
        .start([1u64, 20, 10])
        .space(|n: &u64| if *n < 20 { Some(vec![n * 3]) } else { None })
        .bound(2)
        .unwrap();

    // Start set pruned to [20, 10]; 20 is a leaf; 10 expands to 30, a leaf.
    assert_eq!(first_n(explorer.traverse(), 10), vec![20, 10, 30]);
}

#[test]
fn dedup_frontier_visits_each_cell_once() {
    let frontier = DedupFrontier::new(FifoFrontier::<Cell>::new(), |c: &Cell| *c);
    let mut explorer = Explorer::new(frontier)
        .start([(0, 0)])
        .space(lattice_neighbors);

    let visited: Vec<Cell> = explorer.traverse().map(Result::unwrap).collect();
    let side = usize::try_from(LATTICE_SIDE).unwrap();
    assert_eq!(visited.len(), side * side);

    let mut sorted = visited.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), visited.len(), "no cell visited twice");
}

// ---------------------------------------------------------------------------
// Bounding
// ---------------------------------------------------------------------------

#[test]
fn bounded_frontier_never_exceeds_max() {
    let mut explorer = Explorer::new(FifoFrontier::new())
        .start([0u64])
        .space(|n: &u64| Some((0..7).map(|i| n * 7 + i + 1).collect::<Vec<_>>()))
        .bound(5)
        .unwrap();

    let mut traversal = explorer.traverse();
    for _ in 0..50 {
        assert!(traversal.next().is_some());
    }
    drop(traversal);

    assert!(explorer.current_frontier().len() <= 5);
    let stats = explorer.last_stats();
    assert!(stats.candidates_pruned > 0);
    assert_eq!(stats.expansions, 50);
}

#[test]
fn bound_keeps_best_candidates_by_frontier_policy() {
    // Best-first by value: the bound must keep the smallest values.
    let mut explorer = Explorer::new(PriorityFrontier::new(|n: &u64| *n))
        .start([100u64])
        .space(|n: &u64| {
            if *n == 100 {
                Some(vec![50, 10, 40, 20, 30])
            } else {
                None
            }
        })
        .bound(2)
        .unwrap();

    let visited = first_n(explorer.traverse(), 10);
    assert_eq!(visited, vec![100, 10, 20]);
}

#[test]
fn zero_bound_is_a_configuration_error() {
    let err = Explorer::<u64, _>::new(FifoFrontier::new()).bound(0).err();
    assert_eq!(err, Some(ConfigError::InvalidBound { max: 0 }));

    let policy = ExplorePolicy {
        max_frontier: Some(0),
        cores: None,
    };
    let err = Explorer::<u64, _>::new(FifoFrontier::new())
        .policy(&policy)
        .err();
    assert_eq!(err, Some(ConfigError::InvalidBound { max: 0 }));
}

// ---------------------------------------------------------------------------
// No-expansion absorption and empty start
// ---------------------------------------------------------------------------

#[test]
fn no_expansion_marker_still_yields_candidate() {
    let mut explorer = Explorer::new(FifoFrontier::new())
        .start([1u64])
        .space(|n: &u64| if *n < 3 { Some(vec![n + 1]) } else { None });

    let visited = first_n(explorer.traverse(), 10);
    assert_eq!(visited, vec![1, 2, 3]);
}

#[test]
fn empty_and_absent_expansions_are_equivalent() {
    let mut absent = Explorer::new(FifoFrontier::new())
        .start([0u64, 1])
        .space(|_: &u64| None::<Vec<u64>>);
    let mut empty = Explorer::new(FifoFrontier::new())
        .start([0u64, 1])
        .space(|_: &u64| Some(Vec::<u64>::new()));

    assert_eq!(first_n(absent.traverse(), 5), first_n(empty.traverse(), 5));
}

#[test]
fn empty_start_yields_nothing_and_expands_nothing() {
    let calls = Rc::new(Counter::new(0u32));
    let counter = Rc::clone(&calls);
    let mut explorer = Explorer::<u64, _>::new(FifoFrontier::new())
        .start([])
        .space(move |n: &u64| {
            counter.set(counter.get() + 1);
            fork(n)
        });

    assert_eq!(explorer.traverse().count(), 0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn unset_space_explores_start_set_only() {
    let mut explorer = Explorer::new(LifoFrontier::new()).start([1u64, 2, 3]);
    assert_eq!(first_n(explorer.traverse(), 10), vec![3, 2, 1]);
}

// ---------------------------------------------------------------------------
// Fault propagation
// ---------------------------------------------------------------------------

#[test]
fn fault_stops_traversal_and_surfaces_candidate() {
    let mut explorer = Explorer::new(FifoFrontier::new())
        .start([1u64])
        .try_space(|n: &u64| {
            if *n == 4 {
                return Err(format!("cannot expand {n}").into());
            }
            Ok(fork(n))
        });

    let results: Vec<_> = explorer.traverse().collect();
    let (ok, err): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);

    let ok: Vec<u64> = ok.into_iter().map(Result::unwrap).collect();
    assert_eq!(ok, vec![1, 2, 3, 3]);
    assert_eq!(err.len(), 1, "exactly one fault, then nothing");

    let Err(fault) = &err[0] else {
        unreachable!("partitioned on is_ok");
    };
    assert!(matches!(fault, ExploreError::Expansion { candidate: 4, .. }));
    assert_eq!(fault.to_string(), "expansion failed for candidate 4");
    let source = std::error::Error::source(fault).expect("wrapped source");
    assert_eq!(source.to_string(), "cannot expand 4");
}

// ---------------------------------------------------------------------------
// Early termination
// ---------------------------------------------------------------------------

#[test]
fn consumer_stop_prevents_further_expansion() {
    let calls = Rc::new(Counter::new(0u32));
    let counter = Rc::clone(&calls);
    let mut explorer = Explorer::new(FifoFrontier::new())
        .start([1u64])
        .space(move |n: &u64| {
            counter.set(counter.get() + 1);
            fork(n)
        });

    let found = explorer
        .traverse()
        .map(Result::unwrap)
        .find(|n| *n == 4);
    assert_eq!(found, Some(4));
    // Visited 1, 2, 3, 3, 4: five expansions, none after the match.
    assert_eq!(calls.get(), 5);
}

// ---------------------------------------------------------------------------
// Idempotent configuration
// ---------------------------------------------------------------------------

#[test]
fn two_traversals_produce_identical_sequences() {
    let mut explorer = Explorer::new(FifoFrontier::new())
        .start([1u64])
        .space(fork)
        .bound(8)
        .unwrap();

    let first = first_n(explorer.traverse(), 40);
    let first_stats = explorer.last_stats();
    let second = first_n(explorer.traverse(), 40);

    assert_eq!(first, second);
    assert_eq!(first_stats, explorer.last_stats());
}

#[test]
fn abandoned_traversal_does_not_leak_into_next() {
    let mut explorer = Explorer::new(FifoFrontier::new()).start([1u64]).space(fork);

    let _ = first_n(explorer.traverse(), 3);
    assert!(!explorer.current_frontier().is_empty());

    let fresh = first_n(explorer.traverse(), 5);
    assert_eq!(fresh, vec![1, 2, 3, 3, 4], "frontier reseeded from start");
}
