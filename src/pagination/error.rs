//! Error types for page construction and lazy iteration.

use std::sync::Arc;
use thiserror::Error;

/// Result type for pagination operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Errors returned while building pages or iterating a paged source.
#[derive(Debug, Clone, Error)]
pub enum PaginationError {
    /// The page number is below the one-based minimum.
    #[error("invalid page number {0}, expected at least 1")]
    InvalidPageNumber(u32),

    /// The page size is below the minimum of one row.
    #[error("invalid page size {0}, expected at least 1")]
    InvalidPageSize(u32),

    /// Iteration moved past the last element, or the source shrank below
    /// the row count snapshotted at construction.
    #[error("paged source is exhausted")]
    Exhausted,

    /// The source returned more rows than the requested window allows.
    #[error("source returned {received} rows for a window of {requested}")]
    PageOverflow {
        /// Window size requested from the source.
        requested: u32,
        /// Number of rows the source actually returned.
        received: usize,
    },

    /// The underlying source failed to count or fetch rows.
    #[error("page fetch failed: {0}")]
    Fetch(Arc<dyn std::error::Error + Send + Sync>),
}

impl PaginationError {
    /// Wraps a source failure.
    pub fn fetch_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Fetch(Arc::new(err))
    }
}
