// ==========================================
// PIAR Portal - repository errors
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Repository error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== lookup =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== constraints =====
    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    // ===== infrastructure =====
    #[error("collection lock poisoned: {0}")]
    LockError(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
