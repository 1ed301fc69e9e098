//! Domain error taxonomy shared across the workspace.
//!
//! The API crate maps each variant onto an HTTP status; nothing in here
//! knows about axum or the wire format.

use crate::types::DbId;

/// Failures the domain layer can name precisely.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by id came back empty.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Input broke a domain rule.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The operation contradicts current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credentials are missing or wrong.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to do this.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unexpected failure with no better classification.
    #[error("internal: {0}")]
    Internal(String),
}
