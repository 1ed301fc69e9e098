//! Handlers for invoices: quote conversion, the single-invoice view, and
//! the invoice lister.
//!
//! Conversion is the only place quote status transitions are enforced; a
//! quote that is already converted (or cancelled) stays untouched and the
//! caller gets a conflict.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sitedesk_core::error::CoreError;
use sitedesk_core::quote::QuoteStatus;
use sitedesk_core::types::{DbId, Timestamp};
use sitedesk_db::models::invoice::{ConvertOutcome, InvoiceDetailRow, InvoiceItemRow};
use sitedesk_db::repositories::InvoiceRepo;

use crate::error::{AppError, AppResult};
use crate::query::IdParam;
use crate::response::ResultsResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /billing/quotes/convert`.
#[derive(Debug, Deserialize)]
pub struct ConvertQuoteRequest {
    #[serde(default)]
    pub quote_id: Option<DbId>,
}

/// Response body for a successful conversion.
#[derive(Debug, Serialize)]
pub struct ConvertQuoteResponse {
    pub success: bool,
    pub invoice_id: DbId,
}

/// Serializable invoice header with the derived display address.
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub id: DbId,
    pub quote_id: Option<DbId>,
    pub client_id: DbId,
    pub client_name: String,
    pub client_address: String,
    pub status: String,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: String,
    pub created_at: Timestamp,
}

impl From<InvoiceDetailRow> for InvoiceView {
    fn from(row: InvoiceDetailRow) -> Self {
        let client_address = row.client_address();
        Self {
            id: row.id,
            quote_id: row.quote_id,
            client_id: row.client_id,
            client_name: row.client_name,
            client_address,
            status: row.status,
            issued_date: row.issued_date,
            due_date: row.due_date,
            paid_date: row.paid_date,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Response body for `GET /billing/invoice`.
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceView,
    pub items: Vec<InvoiceItemRow>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/billing/quotes/convert
///
/// Promote a quote to an invoice. The quote's line snapshot is copied
/// verbatim and its status flips to `converted` in the same transaction.
pub async fn convert(
    State(state): State<AppState>,
    payload: Result<Json<ConvertQuoteRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let quote_id = input
        .quote_id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request("Missing quote_id"))?;

    let outcome = InvoiceRepo::convert_from_quote(&state.pool, quote_id)
        .await
        .map_err(|e| AppError::database("Database error converting quote", e))?;

    match outcome {
        ConvertOutcome::Converted(invoice_id) => {
            tracing::info!(quote_id, invoice_id, "quote converted to invoice");
            Ok(Json(ConvertQuoteResponse {
                success: true,
                invoice_id,
            }))
        }
        ConvertOutcome::QuoteNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: quote_id,
        })),
        ConvertOutcome::NotConvertible { status } => {
            let message = if status == QuoteStatus::Converted.as_str() {
                "Quote already converted".to_string()
            } else {
                format!("Quote is {status} and cannot be converted")
            };
            Err(AppError::Core(CoreError::Conflict(message)))
        }
    }
}

/// GET /api/billing/invoice?id=
///
/// Load a single invoice and its line snapshot for the viewer.
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<IdParam>,
) -> AppResult<impl IntoResponse> {
    let id = params
        .id()
        .ok_or_else(|| AppError::bad_request("Missing or invalid invoice id"))?;

    let row = InvoiceRepo::find_detail(&state.pool, id)
        .await
        .map_err(|e| AppError::database("Failed to load invoice", e))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    let items = InvoiceRepo::list_items(&state.pool, id)
        .await
        .map_err(|e| AppError::database("Failed to load invoice", e))?;

    Ok(Json(InvoiceDetailResponse {
        invoice: row.into(),
        items,
    }))
}

/// GET /api/billing/invoices
///
/// List recent invoices with client names and summed totals.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let results = InvoiceRepo::list_summaries(&state.pool)
        .await
        .map_err(|e| AppError::database("Failed to list invoices", e))?;
    Ok(Json(ResultsResponse { results }))
}
