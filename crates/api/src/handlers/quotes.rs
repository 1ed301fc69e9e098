//! Handlers for the quote editor: load one quote, list recent quotes,
//! and the create-or-update save endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sitedesk_core::error::CoreError;
use sitedesk_core::quote::{normalize_lines, QuoteStatus};
use sitedesk_core::types::DbId;
use sitedesk_db::models::quote::{QuoteHeader, QuoteItemRow, QuoteWrite, SaveQuote};
use sitedesk_db::repositories::QuoteRepo;

use crate::error::{AppError, AppResult};
use crate::query::{IdParam, StatusFilterParams};
use crate::response::ResultsResponse;
use crate::state::AppState;

/// Response body for `GET /billing/quote`: header plus the line snapshot.
#[derive(Debug, Serialize)]
pub struct QuoteDetailResponse {
    pub quote: QuoteHeader,
    pub items: Vec<QuoteItemRow>,
}

/// Response body for a successful save.
#[derive(Debug, Serialize)]
pub struct SaveQuoteResponse {
    pub success: bool,
    /// The saved quote's id (fresh on create, unchanged on update).
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/billing/quote?id=
///
/// Load a single quote and its items for the editor.
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params
        .id()
        .ok_or_else(|| AppError::bad_request("Missing or invalid quote id"))?;

    let quote = QuoteRepo::find_header(&state.pool, id)
        .await
        .map_err(|e| AppError::database("Failed to load quote", e))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id,
        }))?;

    let items = QuoteRepo::list_items(&state.pool, id)
        .await
        .map_err(|e| AppError::database("Failed to load quote", e))?;

    Ok(Json(QuoteDetailResponse { quote, items }))
}

/// GET /api/billing/quotes?status=
///
/// List recent quotes for the sidebar. Without a filter, converted quotes
/// are excluded; an unknown filter token is rejected.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<impl IntoResponse> {
    let status = match params.token() {
        None => None,
        Some(token) => Some(
            QuoteStatus::from_str(token)
                .ok_or_else(|| AppError::bad_request("Invalid status filter"))?,
        ),
    };

    let results = QuoteRepo::list_summaries(&state.pool, status)
        .await
        .map_err(|e| AppError::database("Failed to list quotes", e))?;

    Ok(Json(ResultsResponse { results }))
}

/// POST /api/billing/quotes
///
/// Create or update a quote together with its full line-item snapshot.
/// The stored line set is replaced wholesale inside one transaction.
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<SaveQuote>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let client_id = input
        .client_id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request("Missing client_id"))?;

    let lines = normalize_lines(&input.items);
    if lines.is_empty() {
        return Err(AppError::bad_request("At least one line item is required"));
    }

    // Unknown status tokens degrade to draft rather than failing the save.
    let status = match input.status.as_deref().map(str::trim) {
        None | Some("") => QuoteStatus::default(),
        Some(token) => QuoteStatus::from_str(token).unwrap_or_else(|| {
            tracing::warn!(status = token, "unknown quote status, storing draft");
            QuoteStatus::default()
        }),
    };

    let id = input.id.filter(|id| *id > 0);

    // Known tokens are stored as sent; an off-table move is logged, not
    // rejected. Only conversion enforces the transition table.
    if let Some(quote_id) = id {
        if let Ok(Some(current)) = QuoteRepo::find_header(&state.pool, quote_id).await {
            let off_table = QuoteStatus::from_str(&current.status)
                .is_some_and(|prior| !prior.can_transition_to(status));
            if off_table {
                tracing::warn!(
                    quote_id,
                    from = %current.status,
                    to = status.as_str(),
                    "off-table quote status transition"
                );
            }
        }
    }

    let write = QuoteWrite {
        id,
        client_id,
        status,
        title: input.title.as_deref().map(str::trim).unwrap_or_default().to_string(),
        notes: input.notes.as_deref().map(str::trim).unwrap_or_default().to_string(),
        lines,
    };

    let saved_id = match QuoteRepo::save(&state.pool, &write).await {
        Ok(saved_id) => saved_id,
        // The update path signals a vanished quote with RowNotFound.
        Err(sqlx::Error::RowNotFound) => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Quote",
                id: id.unwrap_or(0),
            }));
        }
        Err(err) => return Err(AppError::database("Database error saving quote", err)),
    };

    tracing::debug!(quote_id = saved_id, line_count = write.lines.len(), "quote saved");

    Ok(Json(SaveQuoteResponse {
        success: true,
        id: saved_id,
    }))
}
