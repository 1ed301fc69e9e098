//! Handlers for the billing catalog search boxes (clients and items).
//!
//! Both power autocomplete in the quote editor: no query term returns the
//! whole catalog, a term matches case-insensitively.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sitedesk_db::repositories::{ClientRepo, ItemRepo};

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::response::ResultsResponse;
use crate::state::AppState;

/// GET /api/billing/clients?q=
///
/// Search clients by name or email; without `q`, list them all.
pub async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = ClientRepo::search(&state.pool, params.term())
        .await
        .map_err(|e| AppError::database("Failed to search clients", e))?;
    Ok(Json(ResultsResponse { results }))
}

/// GET /api/billing/items?q=
///
/// Search the item/service catalog by name or description.
pub async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let results = ItemRepo::search(&state.pool, params.term())
        .await
        .map_err(|e| AppError::database("Failed to search items", e))?;
    Ok(Json(ResultsResponse { results }))
}
