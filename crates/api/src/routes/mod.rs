pub mod auth;
pub mod billing;
pub mod directory;
pub mod health;
pub mod intake;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// The mounted tree:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
/// /auth/me                         current user (requires auth)
///
/// /billing/clients                 client search (GET, ?q=)
/// /billing/items                   item catalog search (GET, ?q=)
/// /billing/quote                   load one quote (GET, ?id=)
/// /billing/quotes                  list (GET, ?status=), save (POST)
/// /billing/quotes/convert          convert quote to invoice (POST)
/// /billing/invoice                 load one invoice (GET, ?id=)
/// /billing/invoices                list invoices (GET)
///
/// /employees                       employee directory (GET, requires auth)
/// /quote-requests                  request inbox (GET, requires auth,
///                                  ?page=&pageSize=&q=)
///
/// /contact                         contact form (POST, plaintext reply)
/// /quote-request                   quote request form (POST, plaintext reply)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Billing back office: catalog search, quote editor, invoices.
        .nest("/billing", billing::router())
        // Staff-only directory resources.
        .merge(directory::router())
        // Public site form intake.
        .merge(intake::router())
}
