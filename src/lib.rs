// ==========================================
// PIAR Portal - core library
// ==========================================
// Role-based school portal for students with individualized
// accommodation plans (PIAR).
// Stack: Tauri (optional) + Rust, in-memory collections
// ==========================================

// Message catalogs
rust_i18n::i18n!("locales", fallback = "es-CO");

// ==========================================
// Modules
// ==========================================

// Domain - entities and value types
pub mod domain;

// Repositories - in-memory collections
pub mod repository;

// Engine - scopes, selection sync, account rules
pub mod engine;

// External collaborators - auth, storage, AI
pub mod collaborators;

// Configuration
pub mod config;

// Logging
pub mod logging;

// Internationalization
pub mod i18n;

// API - use-case facades
pub mod api;

// Application - state owner and Tauri integration
pub mod app;

// Demo data
pub mod seed;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    AccommodationPlan, ChatMessage, Document, DocumentType, ProgressEntry, RiskLevel, Role,
    StrategySuggestion, Student, User,
};

pub use engine::{DashboardTab, ScopedStudentsMemo, Selection, StudentFilter};

pub use api::{ApiError, ApiResult};

pub use app::{AppState, Collaborators};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Portal PIAR";
