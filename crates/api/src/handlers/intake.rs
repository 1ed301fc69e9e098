//! Public intake handlers: the quote request form and the contact form.
//!
//! Both are plain HTML form posts from the marketing site, so they answer
//! with short plaintext bodies rather than the JSON envelope. Neither
//! surfaces persistence or SMTP detail to the visitor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Form;
use sitedesk_db::models::quote_request::CreateQuoteRequest;
use sitedesk_db::repositories::QuoteRequestRepo;

use crate::mail::ContactMessage;
use crate::state::AppState;

/// POST /api/quote-request
///
/// Store a quote request submitted from the public site. Always inserts;
/// requests are an append-only inbox reviewed by staff.
pub async fn submit_quote_request(
    State(state): State<AppState>,
    Form(input): Form<CreateQuoteRequest>,
) -> impl IntoResponse {
    match QuoteRequestRepo::insert(&state.pool, &input).await {
        Ok(request) => {
            tracing::info!(request_id = request.id, "quote request received");
            (
                StatusCode::OK,
                "Thank you! Your request has been submitted.",
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "quote request insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sorry, something went wrong. Please try again later.",
            )
        }
    }
}

/// POST /api/contact
///
/// Forward a contact-form message to the office mailbox.
pub async fn send_contact(
    State(state): State<AppState>,
    Form(message): Form<ContactMessage>,
) -> impl IntoResponse {
    let Some(mailer) = state.mailer.as_ref() else {
        tracing::warn!("contact form submitted but SMTP is not configured");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Mailer Error");
    };

    match mailer.send_contact(&message).await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(err) => {
            tracing::error!(error = %err, "contact email failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Mailer Error")
        }
    }
}
