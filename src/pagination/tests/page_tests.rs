//! Unit tests for page-window math.

use crate::pagination::{Page, PaginationError};
use rstest::rstest;

#[rstest]
#[case(1, 25, 0, 25)]
#[case(2, 25, 25, 25)]
#[case(7, 10, 60, 10)]
#[case(1, 1, 0, 1)]
#[case(1, u32::MAX, 0, u32::MAX)]
fn window_translates_page_into_offset_and_limit(
    #[case] number: u32,
    #[case] size: u32,
    #[case] expected_offset: u64,
    #[case] expected_limit: u32,
) {
    let page = Page::new(number, size).expect("valid page");
    let window = page.window();
    assert_eq!(window.offset, expected_offset);
    assert_eq!(window.limit, expected_limit);
}

#[test]
fn window_offset_does_not_overflow_for_max_sized_pages() {
    let page = Page::new(u32::MAX, u32::MAX).expect("valid page");
    let window = page.window();
    assert_eq!(
        window.offset,
        (u64::from(u32::MAX) - 1) * u64::from(u32::MAX)
    );
}

#[rstest]
#[case(0, 10, 1)]
#[case(1, 10, 1)]
#[case(10, 10, 1)]
#[case(11, 10, 2)]
#[case(99, 10, 10)]
#[case(100, 10, 10)]
#[case(101, 10, 11)]
#[case(5, 1, 5)]
#[case(5, u32::MAX, 1)]
fn total_pages_rounds_up_and_keeps_one_page_for_empty_sets(
    #[case] total_count: u64,
    #[case] size: u32,
    #[case] expected: u64,
) {
    assert_eq!(Page::total_pages(total_count, size), expected);
}

#[test]
fn zero_page_number_is_rejected() {
    assert!(matches!(
        Page::new(0, 10),
        Err(PaginationError::InvalidPageNumber(0))
    ));
}

#[test]
fn zero_page_size_is_rejected() {
    assert!(matches!(
        Page::new(1, 0),
        Err(PaginationError::InvalidPageSize(0))
    ));
}
