//! Pure window math translating page requests into offset/limit parameters.

use super::{PaginationError, PaginationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-based window descriptor into an ordered, stable result set.
///
/// Pages are ephemeral request values and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageNumber`] or
    /// [`PaginationError::InvalidPageSize`] when either value is zero.
    pub const fn new(number: u32, size: u32) -> PaginationResult<Self> {
        if number == 0 {
            return Err(PaginationError::InvalidPageNumber(number));
        }
        if size == 0 {
            return Err(PaginationError::InvalidPageSize(size));
        }
        Ok(Self { number, size })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    /// Returns the page size in rows.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the offset/limit parameters selecting this page.
    ///
    /// Offsets are computed in `u64`, so a `u32::MAX` page size covering the
    /// whole result set in one window cannot overflow.
    #[must_use]
    pub const fn window(self) -> PageWindow {
        PageWindow {
            offset: (self.number as u64 - 1) * self.size as u64,
            limit: self.size,
        }
    }

    /// Returns the number of pages needed to cover `total_count` rows.
    ///
    /// An empty result set still has one (empty) page.
    #[must_use]
    pub const fn total_pages(total_count: u64, size: u32) -> u64 {
        if total_count == 0 {
            return 1;
        }
        total_count.div_ceil(size as u64)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} ({} rows)", self.number, self.size)
    }
}

/// Offset/limit parameters produced by [`Page::window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    /// Zero-based row offset of the window's first row.
    pub offset: u64,
    /// Maximum number of rows in the window.
    pub limit: u32,
}
