use crate::app::state::AppState;
use crate::domain::plan::StrategySuggestion;

use super::common::{map_api_error, to_json};

// ==========================================
// PIAR and strategy commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn generate_plan(
    state: tauri::State<'_, AppState>,
    student_id: String,
    context: Option<String>,
) -> Result<String, String> {
    let generated = state
        .generate_plan(&student_id, context.as_deref().unwrap_or_default())
        .await
        .map_err(map_api_error)?;
    to_json(&generated)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn suggest_strategies(
    state: tauri::State<'_, AppState>,
    student_id: String,
    focus: Option<String>,
) -> Result<String, String> {
    let strategies = state
        .suggest_strategies(&student_id, focus.as_deref())
        .await
        .map_err(map_api_error)?;
    to_json(&strategies)
}

#[tauri::command(rename_all = "snake_case")]
pub fn assign_strategy(
    state: tauri::State<'_, AppState>,
    student_id: String,
    strategy: StrategySuggestion,
) -> Result<String, String> {
    let student = state
        .assign_strategy(&student_id, &strategy)
        .map_err(map_api_error)?;
    to_json(&student)
}
