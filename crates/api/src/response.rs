//! The shared list envelope.
//!
//! Every search and list endpoint answers `{ "results": [...] }`. Handlers
//! wrap their rows in [`ResultsResponse`] rather than building ad-hoc
//! `json!` maps, so the shape stays typed and uniform. One-off shapes
//! (quote detail, auth tokens, the paged request inbox) live next to their
//! handlers.

use serde::Serialize;

/// `{ "results": [T] }`, the answer shape of every list endpoint.
#[derive(Debug, Serialize)]
pub struct ResultsResponse<T: Serialize> {
    pub results: Vec<T>,
}
