// ==========================================
// PIAR Portal - Tauri commands (split by area)
// ==========================================
// Commands return JSON strings; errors are `{code, message}` JSON.
// ==========================================

#![cfg(feature = "tauri-app")]

mod assistant;
mod common;
mod piar;
mod session;
mod students;
mod users;

pub use assistant::*;
pub use piar::*;
pub use session::*;
pub use students::*;
pub use users::*;
