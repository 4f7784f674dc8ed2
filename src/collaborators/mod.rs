// ==========================================
// PIAR Portal - external collaborators
// ==========================================
// Auth, object storage and generative AI behind narrow async traits.
// Plain request/response: no retry, no timeout, no cancellation.
// ==========================================

pub mod ai;
pub mod auth;
pub mod error;
pub mod storage;

pub use ai::{GenerationRequest, GenerativeService, ResponseSchema};
pub use auth::{AuthAccount, AuthProvider, AuthSession, InMemoryAuthProvider, SignUpRequest};
pub use error::{CollaboratorError, CollaboratorResult};
pub use storage::{student_object_path, InMemoryObjectStorage, LocalObjectStorage, ObjectStorage};
