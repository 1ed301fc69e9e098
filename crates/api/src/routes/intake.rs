//! Route definitions for the public site's form intake.

use axum::routing::post;
use axum::Router;

use crate::handlers::intake;
use crate::state::AppState;

/// Top-level public form routes (plaintext responses).
///
/// ```text
/// POST /contact        -> intake::send_contact
/// POST /quote-request  -> intake::submit_quote_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(intake::send_contact))
        .route("/quote-request", post(intake::submit_quote_request))
}
