//! The handler-facing error type and its JSON rendering.
//!
//! Handlers return [`AppResult`]; every error renders as the shared
//! `{"success": false, "error": "..."}` envelope with an appropriate status.
//! Persistence and crypto detail stays in the logs: callers only ever see
//! the caller-safe message a constructor was given.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sitedesk_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain error from `sitedesk_core`, mapped to 4xx statuses.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raw sqlx error. Used by the `?` paths that have no better context;
    /// handlers that can name the operation use [`AppError::database`].
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 500 with a caller-safe message; the real error was already logged.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Unauthorized(msg.into()))
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Forbidden(msg.into()))
    }

    /// Log a failed database operation and keep only `context` for the
    /// caller.
    pub fn database(context: &'static str, err: sqlx::Error) -> Self {
        tracing::error!(error = %err, context, "database operation failed");
        Self::InternalError(context.to_string())
    }

    /// Same sanitizing treatment for non-database failures (SMTP, token
    /// signing, hashing).
    pub fn internal(context: &'static str, err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, context, "internal error");
        Self::InternalError(context.to_string())
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => core_status(core),
            AppError::Database(err) => database_status(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

/// The JSON error envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        let body = ErrorBody {
            success: false,
            error,
        };
        (status, axum::Json(body)).into_response()
    }
}

fn core_status(core: &CoreError) -> (StatusCode, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Map a sqlx error onto the wire: vanished rows are 404, unique-constraint
/// collisions are 409, everything else is a sanitized 500.
fn database_status(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                (
                    StatusCode::CONFLICT,
                    format!("Duplicate value for constraint {constraint}"),
                )
            } else {
                tracing::error!(error = %db_err, "Unique violation on unexpected constraint");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
        other => {
            tracing::error!(error = %other, "Unhandled database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}
