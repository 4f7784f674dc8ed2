// ==========================================
// PIAR Portal - student repository
// ==========================================
// Owns the student collection. Documents and progress entries live
// inside their student, so every change goes through here.
// ==========================================

use crate::domain::student::{Document, ProgressEntry, Student};
use crate::repository::collection::{Collection, Keyed, Snapshot};
use crate::repository::error::{RepositoryError, RepositoryResult};

const ENTITY: &str = "Student";

impl Keyed for Student {
    fn key(&self) -> &str {
        &self.id
    }
}

pub struct StudentRepository {
    students: Collection<Student>,
}

impl StudentRepository {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students: Collection::new(students),
        }
    }

    pub fn list(&self) -> RepositoryResult<Snapshot<Student>> {
        self.students.snapshot()
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Student>> {
        self.students.find(id)
    }

    pub fn get(&self, id: &str) -> RepositoryResult<Student> {
        self.find_by_id(id)?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))
    }

    pub fn insert(&self, student: Student) -> RepositoryResult<()> {
        self.students.mutate(|items| {
            if items.iter().any(|s| s.id == student.id) {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "student id {} already exists",
                    student.id
                )));
            }
            items.push(student);
            Ok(())
        })
    }

    /// Replace the stored student with `updated` (matched by id, order kept).
    pub fn replace(&self, updated: Student) -> RepositoryResult<()> {
        self.students.replace(updated, ENTITY)
    }

    /// Apply `f` to the stored student and return the updated copy.
    pub fn update_with(
        &self,
        id: &str,
        f: impl FnOnce(&mut Student) -> RepositoryResult<()>,
    ) -> RepositoryResult<Student> {
        self.students.mutate(|items| {
            let student = items
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
            f(student)?;
            Ok(student.clone())
        })
    }

    pub fn add_document(&self, student_id: &str, document: Document) -> RepositoryResult<Student> {
        self.update_with(student_id, |student| {
            student.documents.push(document);
            Ok(())
        })
    }

    pub fn delete_document(&self, student_id: &str, document_id: &str) -> RepositoryResult<Student> {
        self.update_with(student_id, |student| {
            let before = student.documents.len();
            student.documents.retain(|d| d.id != document_id);
            if student.documents.len() == before {
                return Err(RepositoryError::not_found("Document", document_id));
            }
            Ok(())
        })
    }

    /// Progress is newest first, so new entries go to the front.
    pub fn prepend_progress(&self, student_id: &str, entry: ProgressEntry) -> RepositoryResult<Student> {
        self.update_with(student_id, |student| {
            student.progress.insert(0, entry);
            Ok(())
        })
    }

    /// Clear `teacher` on every student assigned to `teacher_name`.
    ///
    /// Returns the ids of the students that were unassigned. Publishes no
    /// new revision when nobody was assigned.
    pub fn unassign_teacher(&self, teacher_name: &str) -> RepositoryResult<Vec<String>> {
        let affected = self
            .list()?
            .items
            .iter()
            .filter(|s| s.is_assigned_to(teacher_name))
            .count();
        if affected == 0 {
            return Ok(Vec::new());
        }

        self.students.mutate(|items| {
            let mut ids = Vec::new();
            for student in items.iter_mut().filter(|s| s.is_assigned_to(teacher_name)) {
                student.teacher = None;
                ids.push(student.id.clone());
            }
            Ok(ids)
        })
    }
}
