//! Route definitions for the `/billing` back office.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, invoices, quotes};
use crate::state::AppState;

/// The `/billing` subtree.
///
/// Single-resource reads (`/quote`, `/invoice`) take their id as a query
/// parameter; the editor front end has always called them that way.
///
/// ```text
/// GET  /clients          -> catalog::search_clients
/// GET  /items            -> catalog::search_items
/// GET  /quote?id=        -> quotes::get
/// GET  /quotes           -> quotes::list
/// POST /quotes           -> quotes::save
/// POST /quotes/convert   -> invoices::convert
/// GET  /invoice?id=      -> invoices::get
/// GET  /invoices         -> invoices::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(catalog::search_clients))
        .route("/items", get(catalog::search_items))
        .route("/quote", get(quotes::get))
        .route("/quotes", get(quotes::list).post(quotes::save))
        .route("/quotes/convert", post(invoices::convert))
        .route("/invoice", get(invoices::get))
        .route("/invoices", get(invoices::list))
}
