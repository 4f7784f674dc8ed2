// ==========================================
// PIAR Portal - API layer
// ==========================================
// Use-case facades called by AppState and the Tauri commands.
// ==========================================

mod accounts;
pub mod assistant_api;
pub mod auth_api;
pub mod dashboard_api;
pub mod error;
pub mod piar_api;
pub mod student_api;
pub mod user_api;

pub use assistant_api::AssistantApi;
pub use auth_api::AuthApi;
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult, GenerationTarget, Service, ValidationIssue};
pub use piar_api::{GeneratedPlan, PiarApi};
pub use student_api::{DocumentUpload, StudentApi};
pub use user_api::{UserApi, UserDeletion};
