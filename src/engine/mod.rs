// ==========================================
// PIAR Portal - engine layer
// ==========================================
// Pure business rules: role scopes, selection sync, account rules,
// navigation and dashboard aggregates. No I/O.
// ==========================================

pub mod credentials;
pub mod dashboard;
pub mod navigation;
pub mod selection;
pub mod username;
pub mod visibility;

pub use credentials::{initial_password, random_token};
pub use dashboard::{summarize, DashboardSummary, RiskBreakdown};
pub use navigation::{tabs_for, DashboardTab, TabState};
pub use selection::{replace_by_id, Selection};
pub use username::{base_username, generate_username};
pub use visibility::{scope_students, visible_users, ScopedStudentsMemo, StudentFilter};
