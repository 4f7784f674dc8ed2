// ==========================================
// PIAR Portal - collaborator call errors
// ==========================================

use thiserror::Error;

/// Failure of an external collaborator call (auth, storage, AI).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    // ===== auth =====
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    // ===== transport =====
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing configuration: {0}")]
    NotConfigured(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
