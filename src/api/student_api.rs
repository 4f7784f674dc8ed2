// ==========================================
// PIAR Portal - student API
// ==========================================
// Every mutation returns the updated Student so the caller can
// refresh its selection with it.
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult, Service};
use crate::collaborators::storage::{student_object_path, ObjectStorage};
use crate::domain::plan::StrategySuggestion;
use crate::domain::student::{Document, NewStudent, ProgressEntry, StrategyPayload, Student};
use crate::domain::types::{DocumentType, RiskLevel, Role};
use crate::domain::user::User;
use crate::engine::visibility::{scope_students, StudentFilter};
use crate::i18n::t_with_args;
use crate::repository::{StudentRepository, UserRepository};

/// A file picked by the user, to be stored and attached to a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub title: String,
    pub doc_type: DocumentType,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct StudentApi {
    students: Arc<StudentRepository>,
    users: Arc<UserRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl StudentApi {
    pub fn new(
        students: Arc<StudentRepository>,
        users: Arc<UserRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            students,
            users,
            storage,
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// Role scope first, then the list filter.
    pub fn list_scoped(&self, viewer: &User, filter: &StudentFilter) -> ApiResult<Vec<Student>> {
        let snapshot = self.students.list()?;
        let scoped = scope_students(&snapshot.items, viewer);
        if filter.is_empty() {
            return Ok(scoped);
        }
        Ok(filter.apply(&scoped))
    }

    pub fn get(&self, student_id: &str) -> ApiResult<Student> {
        Ok(self.students.get(student_id)?)
    }

    // ==========================================
    // Mutations
    // ==========================================

    pub fn create_student(&self, input: NewStudent) -> ApiResult<Student> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ApiError::required("name"));
        }
        let grade = input.grade.trim();
        if grade.is_empty() {
            return Err(ApiError::required("grade"));
        }
        let teacher = input
            .teacher
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if let Some(teacher) = &teacher {
            self.ensure_teacher(teacher)?;
        }

        let mut student = Student::new(
            format!("st_{}", uuid::Uuid::new_v4().simple()),
            name,
            grade,
        );
        student.age = input.age;
        student.risk_level = input.risk_level.unwrap_or(RiskLevel::Low);
        student.diagnosis = input.diagnosis.trim().to_string();
        student.teacher = teacher;

        self.students.insert(student.clone())?;
        info!(student_id = %student.id, "student created");
        Ok(student)
    }

    /// Replace the stored record with `updated`, matched by id.
    pub fn update_student(&self, updated: Student) -> ApiResult<Student> {
        if updated.name.trim().is_empty() {
            return Err(ApiError::required("name"));
        }
        self.students.replace(updated.clone())?;
        debug!(student_id = %updated.id, "student updated");
        Ok(updated)
    }

    /// Set or clear (`None`) the student's teacher.
    pub fn assign_teacher(&self, student_id: &str, teacher_name: Option<&str>) -> ApiResult<Student> {
        let teacher = teacher_name.map(str::trim).filter(|t| !t.is_empty());
        if let Some(name) = teacher {
            self.ensure_teacher(name)?;
        }
        let updated = self.students.update_with(student_id, |student| {
            student.teacher = teacher.map(str::to_string);
            Ok(())
        })?;
        info!(student_id, teacher = ?updated.teacher, "teacher assigned");
        Ok(updated)
    }

    pub fn add_progress(&self, student_id: &str, author: &str, note: &str) -> ApiResult<Student> {
        if note.trim().is_empty() {
            return Err(ApiError::required("note"));
        }
        let entry = ProgressEntry::new(student_id, author, note.trim());
        Ok(self.students.prepend_progress(student_id, entry)?)
    }

    /// Record a strategy as a progress entry carrying the strategy itself.
    pub fn assign_strategy(
        &self,
        student_id: &str,
        author: &str,
        strategy: &StrategySuggestion,
    ) -> ApiResult<Student> {
        if strategy.title.trim().is_empty() {
            return Err(ApiError::required("title"));
        }
        let note = t_with_args("progress.strategy_assigned", &[("title", &strategy.title)]);
        let entry = ProgressEntry::new(student_id, author, note).with_strategy(StrategyPayload {
            title: strategy.title.clone(),
            description: strategy.description.clone(),
        });
        Ok(self.students.prepend_progress(student_id, entry)?)
    }

    pub fn add_document(
        &self,
        student_id: &str,
        title: &str,
        doc_type: DocumentType,
        url: Option<String>,
    ) -> ApiResult<Student> {
        if title.trim().is_empty() {
            return Err(ApiError::required("title"));
        }
        let mut document = Document::new(student_id, title.trim(), doc_type);
        document.url = url;
        Ok(self.students.add_document(student_id, document)?)
    }

    pub fn delete_document(&self, student_id: &str, document_id: &str) -> ApiResult<Student> {
        let updated = self.students.delete_document(student_id, document_id)?;
        info!(student_id, document_id, "document deleted");
        Ok(updated)
    }

    /// Upload first, then attach. A failed upload changes nothing.
    pub async fn upload_document(&self, student_id: &str, upload: DocumentUpload) -> ApiResult<Student> {
        if upload.title.trim().is_empty() {
            return Err(ApiError::required("title"));
        }
        if upload.file_name.trim().is_empty() {
            return Err(ApiError::required("file"));
        }
        // fail fast on an unknown student, before touching storage
        self.students.get(student_id)?;

        let mut document = Document::new(student_id, upload.title.trim(), upload.doc_type);
        let path = student_object_path(student_id, &document.id, &upload.file_name);
        let url = self
            .storage
            .upload(&path, upload.bytes, &upload.content_type)
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Storage, e))?;
        document.url = Some(url);

        let updated = self.students.add_document(student_id, document)?;
        debug!(student_id, path = %path, "document uploaded");
        Ok(updated)
    }

    fn ensure_teacher(&self, name: &str) -> ApiResult<()> {
        let known = self
            .users
            .list_by_role(Role::Teacher)?
            .iter()
            .any(|u| u.name == name);
        if known {
            Ok(())
        } else {
            Err(ApiError::not_found("Teacher", name))
        }
    }
}
