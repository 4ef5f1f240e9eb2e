//! Port contract for chunked access to an ordered result set.

use super::PaginationResult;
use async_trait::async_trait;

/// Chunked read access to an ordered, stable result set.
///
/// Implementations are thin wrappers over a repository's count and
/// page-fetch queries. The iteration contract assumes the source imposes a
/// stable ordering; the pagination layer only slices, never reorders.
#[cfg_attr(test, mockall::automock(type Item = u32;))]
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Element type produced by the source.
    type Item: Send;

    /// Counts the rows currently visible to the source.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::Fetch`] when the underlying query fails.
    ///
    /// [`PaginationError::Fetch`]: super::PaginationError::Fetch
    async fn count(&self) -> PaginationResult<u64>;

    /// Returns at most `limit` rows starting at the zero-based `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::Fetch`] when the underlying query fails.
    ///
    /// [`PaginationError::Fetch`]: super::PaginationError::Fetch
    async fn fetch(&self, offset: u64, limit: u32) -> PaginationResult<Vec<Self::Item>>;
}
