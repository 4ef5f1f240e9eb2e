//! Lazy page-buffering iteration over a [`PageSource`].

use super::{PageSource, PaginationError, PaginationResult};
use std::collections::VecDeque;

/// Streams an ordered result set one page at a time.
///
/// The row count is snapshotted once at construction and never re-queried,
/// so iteration stays stable even while the underlying store is modified by
/// others; callers must not assume freshness beyond that snapshot. At most
/// one page is buffered in memory. The iterator is not restartable: build a
/// fresh one to iterate again.
pub struct PagedIterator<S: PageSource> {
    source: S,
    page_size: u32,
    total: u64,
    position: u64,
    buffer: VecDeque<S::Item>,
}

impl<S: PageSource> PagedIterator<S> {
    /// Opens an iterator, snapshotting the source's row count once.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] for a zero page size and
    /// [`PaginationError::Fetch`] when the count query fails.
    pub async fn open(source: S, page_size: u32) -> PaginationResult<Self> {
        let total = source.count().await?;
        Self::with_total(source, page_size, total)
    }

    /// Builds an iterator over a pre-counted result set.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] for a zero page size.
    pub fn with_total(source: S, page_size: u32, total: u64) -> PaginationResult<Self> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize(page_size));
        }
        Ok(Self {
            source,
            page_size,
            total,
            position: 0,
            buffer: VecDeque::new(),
        })
    }

    /// Returns true while elements remain under the count snapshot.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.position < self.total
    }

    /// Returns the zero-based position of the next element.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the row count snapshotted at construction.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the next element, fetching a new page when the buffered one
    /// is consumed.
    ///
    /// Blocks on the source exactly every `page_size`-th call, never
    /// otherwise.
    ///
    /// # Errors
    ///
    /// - [`PaginationError::Exhausted`] when iteration is past the snapshot,
    ///   or the source returned fewer rows than the snapshot promised.
    /// - [`PaginationError::PageOverflow`] when the source returned more
    ///   rows than requested.
    /// - [`PaginationError::Fetch`] when the page query fails.
    pub async fn try_next(&mut self) -> PaginationResult<S::Item> {
        if !self.has_next() {
            return Err(PaginationError::Exhausted);
        }

        if self.position % u64::from(self.page_size) == 0 {
            let fetched = self.source.fetch(self.position, self.page_size).await?;
            if fetched.len() > self.page_size as usize {
                return Err(PaginationError::PageOverflow {
                    requested: self.page_size,
                    received: fetched.len(),
                });
            }
            self.buffer = fetched.into_iter().collect();
        }

        // An empty or short page means the source shrank below the snapshot.
        let item = self.buffer.pop_front().ok_or(PaginationError::Exhausted)?;
        self.position += 1;
        Ok(item)
    }

    /// Drains the remaining elements into a vector.
    ///
    /// Intended for small result sets and tests; large sets should consume
    /// [`Self::try_next`] directly to keep at most one page in memory.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::try_next`].
    pub async fn collect_remaining(mut self) -> PaginationResult<Vec<S::Item>> {
        let mut items = Vec::new();
        while self.has_next() {
            items.push(self.try_next().await?);
        }
        Ok(items)
    }
}
