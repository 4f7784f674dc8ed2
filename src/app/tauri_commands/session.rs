use crate::app::state::AppState;
use crate::domain::user::RegistrationForm;
use crate::engine::navigation::DashboardTab;

use super::common::{map_api_error, to_json};

// ==========================================
// Session and navigation commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn login(
    state: tauri::State<'_, AppState>,
    identifier: String,
    password: String,
) -> Result<String, String> {
    let user = state
        .login(&identifier, &password)
        .await
        .map_err(map_api_error)?;
    to_json(&user)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn register(
    state: tauri::State<'_, AppState>,
    form: RegistrationForm,
) -> Result<String, String> {
    let user = state.register(form).await.map_err(map_api_error)?;
    to_json(&user)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn reset_password(
    state: tauri::State<'_, AppState>,
    email: String,
) -> Result<String, String> {
    state.reset_password(&email).await.map_err(map_api_error)?;
    to_json(&serde_json::json!({ "ok": true }))
}

#[tauri::command(rename_all = "snake_case")]
pub fn logout(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.logout().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "ok": true }))
}

#[tauri::command(rename_all = "snake_case")]
pub fn get_current_user(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let user = state.current_user().map_err(map_api_error)?;
    to_json(&user)
}

/// Active tab plus the tabs offered to the signed-in role
#[tauri::command(rename_all = "snake_case")]
pub fn get_tabs(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let active = state.active_tab().map_err(map_api_error)?;
    let available = state.available_tabs().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "active": active, "available": available }))
}

#[tauri::command(rename_all = "snake_case")]
pub fn select_tab(
    state: tauri::State<'_, AppState>,
    tab: DashboardTab,
) -> Result<String, String> {
    let changed = state.select_tab(tab).map_err(map_api_error)?;
    let active = state.active_tab().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "changed": changed, "active": active }))
}

#[tauri::command(rename_all = "snake_case")]
pub fn is_busy(state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&state.is_busy())
}
