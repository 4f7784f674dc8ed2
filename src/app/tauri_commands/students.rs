use crate::api::DocumentUpload;
use crate::app::state::AppState;
use crate::domain::student::{NewStudent, Student};
use crate::domain::types::DocumentType;
use crate::engine::visibility::StudentFilter;

use super::common::{map_api_error, to_json};

// ==========================================
// Student commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub fn list_students(
    state: tauri::State<'_, AppState>,
    filter: Option<StudentFilter>,
) -> Result<String, String> {
    let students = state
        .list_students(&filter.unwrap_or_default())
        .map_err(map_api_error)?;
    to_json(&students)
}

#[tauri::command(rename_all = "snake_case")]
pub fn select_student(
    state: tauri::State<'_, AppState>,
    student_id: String,
) -> Result<String, String> {
    let student = state.select_student(&student_id).map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn get_selected_student(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let student = state.selected_student().map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn create_student(
    state: tauri::State<'_, AppState>,
    input: NewStudent,
) -> Result<String, String> {
    let student = state.create_student(input).map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn update_student(
    state: tauri::State<'_, AppState>,
    student: Student,
) -> Result<String, String> {
    let student = state.update_student(student).map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn assign_teacher(
    state: tauri::State<'_, AppState>,
    student_id: String,
    teacher_name: Option<String>,
) -> Result<String, String> {
    let student = state
        .assign_teacher(&student_id, teacher_name.as_deref())
        .map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn add_progress(
    state: tauri::State<'_, AppState>,
    student_id: String,
    note: String,
) -> Result<String, String> {
    let student = state.add_progress(&student_id, &note).map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn add_document(
    state: tauri::State<'_, AppState>,
    student_id: String,
    title: String,
    doc_type: DocumentType,
    url: Option<String>,
) -> Result<String, String> {
    let student = state
        .add_document(&student_id, &title, doc_type, url)
        .map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn delete_document(
    state: tauri::State<'_, AppState>,
    student_id: String,
    document_id: String,
) -> Result<String, String> {
    let student = state
        .delete_document(&student_id, &document_id)
        .map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn upload_document(
    state: tauri::State<'_, AppState>,
    student_id: String,
    upload: DocumentUpload,
) -> Result<String, String> {
    let student = state
        .upload_document(&student_id, upload)
        .await
        .map_err(map_api_error)?;
    to_json(&student)
}

#[tauri::command(rename_all = "snake_case")]
pub fn get_dashboard_summary(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let summary = state.dashboard().map_err(map_api_error)?;
    to_json(&summary)
}
