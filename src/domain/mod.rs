// ==========================================
// PIAR Portal - domain layer
// ==========================================
// Entities and value types only.
// No collection access, no collaborator calls.
// ==========================================

pub mod chat;
pub mod plan;
pub mod student;
pub mod types;
pub mod user;

pub use chat::{ChatMessage, ChatRole, Conversation};
pub use plan::{AccommodationPlan, AreaActivities, AreaAdjustment, StrategyList, StrategySuggestion};
pub use student::{Document, NewStudent, ProgressEntry, StrategyPayload, Student};
pub use types::{DocumentType, RiskLevel, Role};
pub use user::{NewUser, RegistrationForm, User};
