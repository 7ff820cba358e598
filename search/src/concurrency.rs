//! Concurrency width: how many candidates the async explorer expands per batch.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::BoxError;

/// Boxed width resolver.
type WidthFn = Box<dyn Fn() -> BoxFuture<'static, Result<usize, BoxError>> + Send + Sync>;

/// Fixed width or a resolver consulted once at the start of every batch.
///
/// Whatever the source, the resolved width is coerced to at least 1.
pub enum Concurrency {
    /// Same width for every batch.
    Fixed(usize),
    /// Width computed (possibly asynchronously, possibly remotely) per batch.
    Dynamic(WidthFn),
}

impl Concurrency {
    /// A fixed width.
    #[must_use]
    pub fn fixed(width: usize) -> Self {
        Self::Fixed(width)
    }

    /// One batch slot per available hardware thread (1 if unknown).
    #[must_use]
    pub fn available_parallelism() -> Self {
        Self::Fixed(std::thread::available_parallelism().map_or(1, NonZeroUsize::get))
    }

    /// A synchronous resolver, e.g. reading a live worker count.
    #[must_use]
    pub fn from_fn<F>(resolve: F) -> Self
    where
        F: Fn() -> usize + Send + Sync + 'static,
    {
        Self::Dynamic(Box::new(move || {
            futures::future::ready(Ok::<usize, BoxError>(resolve())).boxed()
        }))
    }

    /// An asynchronous, fallible resolver.
    ///
    /// A resolver error halts the traversal before the batch that needed the
    /// width is pulled.
    #[must_use]
    pub fn resolver<F, Fut>(resolve: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<usize, BoxError>> + Send + 'static,
    {
        Self::Dynamic(Box::new(move || resolve().boxed()))
    }

    /// Resolve the width for the next batch.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's error unchanged.
    pub async fn resolve(&self) -> Result<usize, BoxError> {
        let width = match self {
            Self::Fixed(width) => *width,
            Self::Dynamic(resolve) => resolve().await?,
        };
        Ok(width.max(1))
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::available_parallelism()
    }
}

impl From<usize> for Concurrency {
    fn from(width: usize) -> Self {
        Self::Fixed(width)
    }
}

impl std::fmt::Debug for Concurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(width) => f.debug_tuple("Fixed").field(width).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
