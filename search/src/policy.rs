//! Explorer configuration.

use serde::{Deserialize, Serialize};

use crate::bound::Bound;
use crate::error::ConfigError;

/// Frontier bound and concurrency configuration shared by both explorers.
///
/// Applied through `Explorer::policy` / `AsyncExplorer::policy`, which
/// validate it before any traversal starts. The sync explorer ignores
/// `cores`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplorePolicy {
    /// Frontier prune threshold (`None` = keep the explorer's current bound).
    #[serde(default)]
    pub max_frontier: Option<usize>,
    /// Fixed concurrency width for the async explorer (`None` = keep the
    /// explorer's current setting).
    #[serde(default)]
    pub cores: Option<usize>,
}

impl ExplorePolicy {
    /// Parse a policy from JSON bytes and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] if the bytes are not a policy
    /// object, or any error [`validate`](Self::validate) reports.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let policy: Self =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Malformed {
                detail: e.to_string(),
            })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Validate bound and width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBound`] for `max_frontier == Some(0)` and
    /// [`ConfigError::InvalidConcurrency`] for `cores == Some(0)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bound()?;
        if self.cores == Some(0) {
            return Err(ConfigError::InvalidConcurrency { cores: 0 });
        }
        Ok(())
    }

    /// The validated frontier bound, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBound`] for `max_frontier == Some(0)`.
    pub fn bound(&self) -> Result<Option<Bound>, ConfigError> {
        self.max_frontier.map(Bound::new).transpose()
    }

    /// Deterministic JSON rendering for audit output.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cores": self.cores,
            "max_frontier": self.max_frontier,
            "schema_version": "explore_policy.v1",
        })
    }
}
