//! Traversal counters.

/// Aggregate counters for one traversal.
///
/// Counters restart at zero whenever a new traversal begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Number of expansion-function invocations that succeeded.
    pub expansions: u64,
    /// Successor candidates accepted by the frontier (start set included).
    pub candidates_generated: u64,
    /// Candidates discarded by bounding.
    pub candidates_pruned: u64,
    /// Batches pulled (async explorer only).
    pub batches: u64,
    /// Largest frontier size observed right after an insertion step.
    pub frontier_high_water: usize,
}

impl TraversalStats {
    /// Deterministic JSON rendering for audit output.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "batches": self.batches,
            "candidates_generated": self.candidates_generated,
            "candidates_pruned": self.candidates_pruned,
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
        })
    }
}
