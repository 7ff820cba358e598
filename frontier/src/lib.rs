//! Forage Frontier: pending-work collections that drive exploration order.
//!
//! This crate has no dependencies. The explorers in `forage_search` only ever
//! talk to a frontier through the [`Frontier`] trait; every retrieval policy
//! is a separate implementation of it.
//!
//! # Crate dependency graph
//!
//! ```text
//! forage_frontier  ←  forage_search
//! (policies)          (sync + async explorers)
//! ```
//!
//! # Policies
//!
//! - [`FifoFrontier`]: first in, first out (breadth-first exploration)
//! - [`LifoFrontier`]: stack (depth-first exploration)
//! - [`PriorityFrontier`]: lowest key first (best-first exploration)
//! - [`ComparatorFrontier`]: best-first by a two-candidate comparator
//! - [`DedupFrontier`]: visited-set decorator over any other policy

#![forbid(unsafe_code)]

pub mod comparator;
pub mod contract;
pub mod dedup;
pub mod fifo;
pub mod lifo;
pub mod priority;

pub use comparator::ComparatorFrontier;
pub use contract::Frontier;
pub use dedup::DedupFrontier;
pub use fifo::FifoFrontier;
pub use lifo::LifoFrontier;
pub use priority::PriorityFrontier;
