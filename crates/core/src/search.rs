//! Pagination policy shared by the API handlers and the repositories.
//! Plain integer math, no I/O.

// ---------------------------------------------------------------------------
// Page-size policy
// ---------------------------------------------------------------------------

/// Rows per request-inbox page when the client does not say.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Upper bound on a client-requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Row cap for the quote and invoice summary listers.
pub const SUMMARY_LIST_LIMIT: i64 = 50;

/// Clamp a 1-based page number. Anything below 1 (or absent) becomes 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size to `1..=MAX_PAGE_SIZE`, defaulting to
/// [`DEFAULT_PAGE_SIZE`].
pub fn clamp_page_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Page math
// ---------------------------------------------------------------------------

/// Number of pages needed for `total` rows. Never less than 1, so an
/// empty result set still renders as one (empty) page.
///
/// # Examples
///
/// ```
/// use sitedesk_core::search::page_count;
/// assert_eq!(page_count(12, 5), 3);
/// assert_eq!(page_count(10, 5), 2);
/// assert_eq!(page_count(0, 5), 1);
/// ```
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 1;
    }
    (total + page_size - 1) / page_size
}

/// Row offset of a 1-based page.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
