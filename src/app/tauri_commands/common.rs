use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

// ==========================================
// Shared helpers: error mapping, serialization
// ==========================================

/// Error payload returned to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ErrorResponse {
    /// Stable error code
    pub code: String,

    /// Localized, user-facing message
    pub message: String,
}

/// Serialize an ApiError for Tauri (commands return `Result<String, String>`).
pub(super) fn map_api_error(err: ApiError) -> String {
    if !err.is_validation() {
        tracing::warn!(code = err.code(), error = %err, "command failed");
    }
    let response = ErrorResponse {
        code: err.code().to_string(),
        message: err.user_message(),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| err.to_string())
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {}", e))
}
