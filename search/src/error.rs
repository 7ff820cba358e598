//! Typed explorer errors.
//!
//! `ConfigError` represents setup-time failures only: it is returned by the
//! fluent configuration surface before any traversal begins. Runtime faults
//! are expressed as [`ExploreError`], which is always terminal: the traversal
//! that yields one yields nothing afterwards.

use thiserror::Error;

/// Error type accepted from expansion functions, width resolvers and
/// deferred start sets.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Typed failure for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A frontier bound of zero would discard every candidate.
    #[error("invalid frontier bound {max}: must be at least 1")]
    InvalidBound { max: usize },

    /// A fixed concurrency width of zero in a policy.
    #[error("invalid concurrency width {cores}: must be at least 1")]
    InvalidConcurrency { cores: usize },

    /// A serialized policy could not be parsed.
    #[error("malformed explore policy: {detail}")]
    Malformed { detail: String },
}

/// A single failing member of an async batch.
#[derive(Debug, Error)]
#[error("batch member {index} failed: {source}")]
pub struct BatchFailure {
    /// Position of the failing candidate within its batch.
    pub index: usize,
    /// The error returned by the expansion function.
    #[source]
    pub source: BoxError,
}

/// Terminal traversal fault.
///
/// The frontier is left in its last mutated state; resuming is unsupported.
/// Start a fresh traversal instead.
#[derive(Debug, Error)]
pub enum ExploreError<C> {
    /// The expansion function failed for one candidate (sync explorer).
    #[error("expansion failed for candidate {candidate:?}")]
    Expansion {
        candidate: C,
        #[source]
        source: BoxError,
    },

    /// One or more members of a batch failed (async explorer). Results from
    /// the members that succeeded were discarded, not merged.
    #[error(
        "expansion failed for {} of {} candidates in batch {batch:?}",
        .failures.len(),
        .batch.len()
    )]
    BatchExpansion {
        batch: Vec<C>,
        failures: Vec<BatchFailure>,
    },

    /// The concurrency-width resolver failed; the batch never started.
    #[error("concurrency width resolution failed")]
    Concurrency {
        #[source]
        source: BoxError,
    },

    /// The deferred start set could not be resolved.
    #[error("start set resolution failed")]
    Start {
        #[source]
        source: BoxError,
    },
}

impl<C> ExploreError<C> {
    /// The candidates the fault is attributed to (empty for width and start
    /// resolution faults).
    #[must_use]
    pub fn candidates(&self) -> &[C] {
        match self {
            Self::Expansion { candidate, .. } => std::slice::from_ref(candidate),
            Self::BatchExpansion { batch, .. } => batch,
            Self::Concurrency { .. } | Self::Start { .. } => &[],
        }
    }
}
