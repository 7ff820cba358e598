//! Shared spaces and explorer builders for the forage benchmark suites.

use forage_frontier::{FifoFrontier, PriorityFrontier};
use forage_search::{AsyncExplorer, BoxError, Explorer};

/// A traversal regime: branching factor, optional frontier bound, and how many
/// candidates to pull.
#[derive(Debug, Clone, Copy)]
pub struct Regime {
    pub name: &'static str,
    pub fanout: u64,
    pub max_frontier: Option<usize>,
    pub visits: usize,
}

/// The regimes exercised by `regimes` benches.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "narrow_unbounded",
            fanout: 2,
            max_frontier: None,
            visits: 2_000,
        },
        Regime {
            name: "wide_unbounded",
            fanout: 8,
            max_frontier: None,
            visits: 2_000,
        },
        Regime {
            name: "wide_pressure",
            fanout: 8,
            max_frontier: Some(64),
            visits: 2_000,
        },
    ]
}

/// Deterministic `fanout`-ary tree over `u64` labels.
#[must_use]
pub fn successors(n: u64, fanout: u64) -> Vec<u64> {
    (1..=fanout).map(|i| n.wrapping_mul(fanout).wrapping_add(i)).collect()
}

/// Cheap best-first priority: scrambled label bits.
#[must_use]
pub fn score(n: &u64) -> u64 {
    n.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}

/// Breadth-first explorer for `regime`.
///
/// # Panics
///
/// Panics if the regime carries a zero bound.
#[must_use]
pub fn breadth_first(regime: Regime) -> Explorer<u64, FifoFrontier<u64>> {
    let fanout = regime.fanout;
    let explorer = Explorer::new(FifoFrontier::new())
        .start([0u64])
        .space(move |n: &u64| Some(successors(*n, fanout)));
    match regime.max_frontier {
        Some(max) => explorer.bound(max).expect("regime bound is non-zero"),
        None => explorer,
    }
}

/// Best-first explorer for `regime`, ordered by [`score`].
///
/// # Panics
///
/// Panics if the regime carries a zero bound.
#[must_use]
pub fn best_first(
    regime: Regime,
) -> Explorer<u64, PriorityFrontier<u64, u64, fn(&u64) -> u64>> {
    let fanout = regime.fanout;
    let explorer = Explorer::new(PriorityFrontier::new(score as fn(&u64) -> u64))
        .start([0u64])
        .space(move |n: &u64| Some(successors(*n, fanout)));
    match regime.max_frontier {
        Some(max) => explorer.bound(max).expect("regime bound is non-zero"),
        None => explorer,
    }
}

/// Batched breadth-first explorer for `regime` with a fixed width.
///
/// # Panics
///
/// Panics if the regime carries a zero bound.
#[must_use]
pub fn batched(regime: Regime, width: usize) -> AsyncExplorer<u64, FifoFrontier<u64>> {
    let fanout = regime.fanout;
    let explorer = AsyncExplorer::new(FifoFrontier::new())
        .start([0u64])
        .cores(width)
        .space(move |n: u64| async move { Ok::<_, BoxError>(Some(successors(n, fanout))) });
    match regime.max_frontier {
        Some(max) => explorer.bound(max).expect("regime bound is non-zero"),
        None => explorer,
    }
}
