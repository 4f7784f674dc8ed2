// ==========================================
// PIAR Portal - repository layer
// ==========================================
// In-memory collections, copy-on-write, last write wins.
// No business rules here.
// ==========================================

pub mod collection;
pub mod error;
pub mod student_repo;
pub mod user_repo;

pub use collection::{Collection, Keyed, Snapshot};
pub use error::{RepositoryError, RepositoryResult};
pub use student_repo::StudentRepository;
pub use user_repo::UserRepository;
