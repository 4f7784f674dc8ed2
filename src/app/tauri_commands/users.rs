use crate::app::state::AppState;
use crate::domain::user::NewUser;

use super::common::{map_api_error, to_json};

// ==========================================
// User administration commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub fn list_users(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let users = state.list_users().map_err(map_api_error)?;
    to_json(&users)
}

#[tauri::command(rename_all = "snake_case")]
pub fn list_teachers(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let teachers = state.list_teachers().map_err(map_api_error)?;
    to_json(&teachers)
}

/// The response includes the initial password so it can be handed over.
#[tauri::command(rename_all = "snake_case")]
pub async fn create_user(
    state: tauri::State<'_, AppState>,
    new_user: NewUser,
) -> Result<String, String> {
    let user = state.create_user(new_user).await.map_err(map_api_error)?;
    to_json(&user)
}

#[tauri::command(rename_all = "snake_case")]
pub fn delete_user(
    state: tauri::State<'_, AppState>,
    user_id: String,
) -> Result<String, String> {
    let deletion = state.delete_user(&user_id).map_err(map_api_error)?;
    to_json(&deletion)
}
