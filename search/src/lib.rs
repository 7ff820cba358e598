//! Forage Search: lazy frontier exploration, synchronous and batched-async.
//!
//! Given start candidates and an expansion function ("space"), an explorer
//! lazily yields visited candidates in the order chosen by a pluggable
//! [`Frontier`](forage_frontier::Frontier), optionally bounding the live
//! frontier size.
//!
//! # Key types
//!
//! - [`Explorer`]: single-threaded pull loop; traversals are `Iterator`s
//! - [`AsyncExplorer`]: batch-at-a-time concurrent expansion; traversals
//!   are `Stream`s
//! - [`Concurrency`]: fixed or per-batch-resolved expansion width
//! - [`ExplorePolicy`]: bound + width configuration
//! - [`ExploreError`] / [`ConfigError`]: traversal faults and setup errors
//! - [`TraversalStats`]: per-traversal counters

#![forbid(unsafe_code)]

pub mod async_explorer;
pub mod bound;
pub mod concurrency;
pub mod error;
pub mod explorer;
pub mod policy;
pub mod stats;

pub use async_explorer::AsyncExplorer;
pub use bound::Bound;
pub use concurrency::Concurrency;
pub use error::{BatchFailure, BoxError, ConfigError, ExploreError};
pub use explorer::{Explorer, Traversal};
pub use policy::ExplorePolicy;
pub use stats::TraversalStats;
