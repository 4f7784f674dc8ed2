use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// Assistant commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn ask_assistant(
    state: tauri::State<'_, AppState>,
    message: String,
) -> Result<String, String> {
    let reply = state.ask_assistant(&message).await.map_err(map_api_error)?;
    to_json(&reply)
}

#[tauri::command(rename_all = "snake_case")]
pub fn get_conversation(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let messages = state.conversation().map_err(map_api_error)?;
    to_json(&messages)
}

#[tauri::command(rename_all = "snake_case")]
pub fn clear_conversation(state: tauri::State<'_, AppState>) -> Result<String, String> {
    state.clear_conversation().map_err(map_api_error)?;
    to_json(&serde_json::json!({ "ok": true }))
}
