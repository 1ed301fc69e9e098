//! Query-string parameter types used by more than one handler module.
//!
//! Each type owns its own leniency rules (trimming, empty-means-all,
//! bad-id-means-missing) so handlers stay declarative.

use serde::Deserialize;
use sitedesk_core::search::{clamp_page, clamp_page_size};
use sitedesk_core::types::DbId;

/// Free-text search parameter (`?q=`).
///
/// Used by the client and item catalog search endpoints. An absent, empty,
/// or whitespace-only value means "return everything".
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed search term, or `None` when the query is effectively empty.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Single-resource id parameter (`?id=`).
///
/// The browser sends the id as a query string value; anything that is not a
/// positive integer (absent, `0`, garbage) is treated as missing, and the
/// handler answers 400.
#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: Option<String>,
}

impl IdParam {
    /// The numeric id, if present and positive.
    pub fn id(&self) -> Option<DbId> {
        self.id
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse::<DbId>().ok())
            .filter(|id| *id > 0)
    }
}

/// Optional status filter (`?status=`) for the quote list.
#[derive(Debug, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<String>,
}

impl StatusFilterParams {
    /// The trimmed status token, or `None` when no filter was given.
    pub fn token(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Page-number pagination (`?page=&pageSize=&q=`) for the request inbox.
///
/// Values are clamped via `clamp_page` / `clamp_page_size`; the search term
/// follows the same empty-means-all rule as [`SearchParams`].
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
    pub q: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    pub fn page_size(&self) -> i64 {
        clamp_page_size(self.page_size)
    }

    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}
