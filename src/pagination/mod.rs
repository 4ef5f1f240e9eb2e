//! Lazy offset/limit pagination over bounded relational result sets.
//!
//! The module is split into pure window math and a buffering iterator:
//!
//! - [`Page`] and [`PageWindow`] translate a one-based page request into
//!   offset/limit parameters and total-page counts.
//! - [`PagedIterator`] streams an ordered result set one page at a time
//!   through the [`PageSource`] port, never holding more than a single page
//!   in memory.

mod error;
mod iterator;
mod page;
mod source;

pub use error::{PaginationError, PaginationResult};
pub use iterator::PagedIterator;
pub use page::{Page, PageWindow};
pub use source::PageSource;

#[cfg(test)]
mod tests;
