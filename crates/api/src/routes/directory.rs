//! Route definitions for the staff-only directory resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{employees, quote_requests};
use crate::state::AppState;

/// Top-level staff routes (both require a Bearer token).
///
/// ```text
/// GET /employees       -> employees::list
/// GET /quote-requests  -> quote_requests::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(employees::list))
        .route("/quote-requests", get(quote_requests::list))
}
