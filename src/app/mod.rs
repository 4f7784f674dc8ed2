// ==========================================
// PIAR Portal - application layer
// ==========================================
// AppState (single state owner) and the Tauri command surface
// ==========================================

pub mod state;
pub mod tauri_commands;

pub use state::{AppState, BusyGuard, Collaborators};

#[cfg(feature = "tauri-app")]
pub use tauri_commands::*;
