// ==========================================
// PIAR Portal - API errors
// ==========================================
// (a) validation         - inline, recoverable
// (b) collaborator calls - generic localized message, state untouched
// (c) empty results      - "could not generate", soft failure
// Nothing here is fatal; every failure can be retried by the user.
// ==========================================

use std::fmt;

use thiserror::Error;

use crate::collaborators::error::CollaboratorError;
use crate::config::ConfigError;
use crate::i18n::{t, t_with_args};
use crate::repository::error::RepositoryError;

// ==========================================
// ValidationIssue
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    RequiredField(String),
    PasswordsDoNotMatch,
    PasswordTooShort { min: usize },
    InvalidEmail(String),
    UsernameUnavailable(String),
    Duplicate(String),
    UnknownStudent(String),
    Rejected(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::RequiredField(field) => write!(f, "{} is required", field),
            ValidationIssue::PasswordsDoNotMatch => write!(f, "passwords do not match"),
            ValidationIssue::PasswordTooShort { min } => {
                write!(f, "password shorter than {} characters", min)
            }
            ValidationIssue::InvalidEmail(email) => write!(f, "invalid email: {}", email),
            ValidationIssue::UsernameUnavailable(name) => {
                write!(f, "no username can be derived from '{}'", name)
            }
            ValidationIssue::Duplicate(detail) => write!(f, "duplicate record: {}", detail),
            ValidationIssue::UnknownStudent(id) => write!(f, "unknown student: {}", id),
            ValidationIssue::Rejected(reason) => write!(f, "{}", reason),
        }
    }
}

impl ValidationIssue {
    fn user_message(&self) -> String {
        match self {
            ValidationIssue::RequiredField(field) => {
                t_with_args("errors.validation.required_field", &[("field", field)])
            }
            ValidationIssue::PasswordsDoNotMatch => t("errors.validation.passwords_mismatch"),
            ValidationIssue::PasswordTooShort { min } => t_with_args(
                "errors.validation.password_too_short",
                &[("min", &min.to_string())],
            ),
            ValidationIssue::InvalidEmail(_) => t("errors.validation.invalid_email"),
            ValidationIssue::UsernameUnavailable(name) => {
                t_with_args("errors.validation.username_unavailable", &[("name", name)])
            }
            ValidationIssue::Duplicate(detail) => {
                t_with_args("errors.validation.duplicate", &[("detail", detail)])
            }
            ValidationIssue::UnknownStudent(id) => {
                t_with_args("errors.validation.unknown_student", &[("id", id)])
            }
            ValidationIssue::Rejected(reason) => {
                t_with_args("errors.validation.rejected", &[("reason", reason)])
            }
        }
    }
}

// ==========================================
// Collaborator service tag
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Auth,
    Storage,
    Ai,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Auth => write!(f, "auth"),
            Service::Storage => write!(f, "storage"),
            Service::Ai => write!(f, "ai"),
        }
    }
}

/// What the generative service failed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTarget {
    Plan,
    Strategies,
    Reply,
}

impl fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationTarget::Plan => write!(f, "accommodation plan"),
            GenerationTarget::Strategies => write!(f, "strategy list"),
            GenerationTarget::Reply => write!(f, "assistant reply"),
        }
    }
}

impl GenerationTarget {
    fn message_key(&self) -> &'static str {
        match self {
            GenerationTarget::Plan => "generation.plan",
            GenerationTarget::Strategies => "generation.strategies",
            GenerationTarget::Reply => "generation.reply",
        }
    }
}

// ==========================================
// ApiError
// ==========================================
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== (a) validation =====
    #[error("validation failed: {0}")]
    Validation(ValidationIssue),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("not signed in")]
    NotAuthenticated,

    // ===== (b) collaborator failures =====
    #[error("{service} call failed: {message}")]
    Collaborator { service: Service, message: String },

    // ===== (c) not found / empty result =====
    #[error("not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    #[error("could not generate {0}")]
    GenerationUnavailable(GenerationTarget),

    // ===== other =====
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn validation(issue: ValidationIssue) -> Self {
        ApiError::Validation(issue)
    }

    pub fn required(field: &str) -> Self {
        ApiError::Validation(ValidationIssue::RequiredField(field.to_string()))
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Map a collaborator failure. Auth outcomes the user can act on keep
    /// their meaning; everything else becomes a generic service failure.
    pub fn from_collaborator(service: Service, err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::InvalidCredentials => ApiError::InvalidCredentials,
            CollaboratorError::AccountExists(email) => ApiError::AccountExists(email),
            CollaboratorError::AccountNotFound(email) => ApiError::not_found("Account", &email),
            other => ApiError::Collaborator {
                service,
                message: other.to_string(),
            },
        }
    }

    /// Stable code for the UI
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::AccountExists(_) => "ACCOUNT_EXISTS",
            ApiError::NotAuthenticated => "NOT_AUTHENTICATED",
            ApiError::Collaborator { service, .. } => match service {
                Service::Auth => "AUTH_SERVICE_ERROR",
                Service::Storage => "STORAGE_SERVICE_ERROR",
                Service::Ai => "AI_SERVICE_ERROR",
            },
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::GenerationUnavailable(_) => "GENERATION_UNAVAILABLE",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Localized message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(issue) => issue.user_message(),
            ApiError::InvalidCredentials => t("errors.auth.invalid_credentials"),
            ApiError::AccountExists(email) => {
                t_with_args("errors.auth.account_exists", &[("email", email)])
            }
            ApiError::NotAuthenticated => t("errors.not_authenticated"),
            ApiError::Collaborator { service, .. } => match service {
                Service::Auth => t("errors.auth.failed"),
                Service::Storage => t("errors.storage.failed"),
                Service::Ai => t("errors.ai.failed"),
            },
            ApiError::NotFound { entity, .. } => t_with_args("errors.not_found", &[("entity", entity)]),
            ApiError::GenerationUnavailable(target) => {
                let what = t(target.message_key());
                t_with_args("errors.ai.no_result", &[("what", &what)])
            }
            ApiError::InternalError(_) => t("errors.internal"),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::Validation(ValidationIssue::Duplicate(msg))
            }
            RepositoryError::ValidationError(msg) => {
                ApiError::Validation(ValidationIssue::Rejected(msg))
            }
            RepositoryError::LockError(msg) | RepositoryError::InternalError(msg) => {
                ApiError::InternalError(msg)
            }
            RepositoryError::Other(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;
