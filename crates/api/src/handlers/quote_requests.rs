//! Handler for the staff-only quote request inbox.
//!
//! Read side of the public intake form: page through submitted requests,
//! newest first, optionally filtered by a free-text search across every
//! captured field.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sitedesk_core::search::{page_count, page_offset};
use sitedesk_db::models::quote_request::QuoteRequest;
use sitedesk_db::repositories::QuoteRequestRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::query::PageParams;
use crate::state::AppState;

/// Response body for `GET /quote-requests`. Field names follow the
/// page-style casing the back-office table expects.
#[derive(Debug, Serialize)]
pub struct RequestsPageResponse {
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub requests: Vec<QuoteRequest>,
}

/// GET /api/quote-requests?page=&pageSize=&q=
///
/// Page through submitted quote requests. Requires a staff login.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let page_size = params.page_size();
    let term = params.term();

    let total_count = QuoteRequestRepo::count(&state.pool, term)
        .await
        .map_err(|e| AppError::database("Failed to list quote requests", e))?;

    let requests = QuoteRequestRepo::page(&state.pool, term, page_size, page_offset(page, page_size))
        .await
        .map_err(|e| AppError::database("Failed to list quote requests", e))?;

    Ok(Json(RequestsPageResponse {
        page,
        page_size,
        total_count,
        total_pages: page_count(total_count, page_size),
        requests,
    }))
}
