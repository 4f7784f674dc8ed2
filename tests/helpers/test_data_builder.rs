// ==========================================
// Test data builders
// ==========================================

use piar_portal::domain::student::{Document, ProgressEntry, Student};
use piar_portal::domain::types::{DocumentType, RiskLevel, Role};
use piar_portal::domain::user::User;

// ==========================================
// Student builder
// ==========================================

pub struct StudentBuilder {
    student: Student,
}

impl StudentBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            student: Student::new(id, name, "3°"),
        }
    }

    pub fn grade(mut self, grade: &str) -> Self {
        self.student.grade = grade.to_string();
        self
    }

    pub fn teacher(mut self, teacher: &str) -> Self {
        self.student.teacher = Some(teacher.to_string());
        self
    }

    pub fn risk(mut self, level: RiskLevel) -> Self {
        self.student.risk_level = level;
        self
    }

    pub fn diagnosis(mut self, diagnosis: &str) -> Self {
        self.student.diagnosis = diagnosis.to_string();
        self
    }

    pub fn document(mut self, title: &str, doc_type: DocumentType) -> Self {
        let id = self.student.id.clone();
        self.student.documents.push(Document::new(&id, title, doc_type));
        self
    }

    pub fn progress(mut self, author: &str, note: &str) -> Self {
        let id = self.student.id.clone();
        self.student.progress.insert(0, ProgressEntry::new(&id, author, note));
        self
    }

    pub fn build(self) -> Student {
        self.student
    }
}

// ==========================================
// User builder
// ==========================================

pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    /// Email `{username}@colegio.edu`, password `{username}-pass`.
    pub fn new(username: &str, name: &str, role: Role) -> Self {
        Self {
            user: User {
                id: format!("usr_{}", username),
                username: username.to_string(),
                name: name.to_string(),
                email: format!("{}@colegio.edu", username),
                role,
                password: format!("{}-pass", username),
                student_id: None,
                specialization: None,
                phone: None,
                created_at: chrono::Local::now().naive_local(),
            },
        }
    }

    pub fn child(mut self, student_id: &str) -> Self {
        self.user.student_id = Some(student_id.to_string());
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

/// Two teachers, a family, a director and a super admin.
pub fn standard_users() -> Vec<User> {
    vec![
        UserBuilder::new("amorales", "Ana Morales", Role::Teacher).build(),
        UserBuilder::new("cruiz", "Carlos Ruiz", Role::Teacher).build(),
        UserBuilder::new("lgomez", "Laura Gómez", Role::Family)
            .child("st_01")
            .build(),
        UserBuilder::new("ddiaz", "Dora Díaz", Role::Director).build(),
        UserBuilder::new("root", "Root Admin", Role::SuperAdmin).build(),
    ]
}

/// st_01 and st_03 with Ana Morales, st_02 with Carlos Ruiz, st_04 unassigned.
pub fn standard_students() -> Vec<Student> {
    vec![
        StudentBuilder::new("st_01", "Sofía Gómez")
            .teacher("Ana Morales")
            .risk(RiskLevel::Medium)
            .diagnosis("TDAH")
            .build(),
        StudentBuilder::new("st_02", "Mateo Ríos")
            .grade("5°")
            .teacher("Carlos Ruiz")
            .risk(RiskLevel::High)
            .diagnosis("Dislexia")
            .build(),
        StudentBuilder::new("st_03", "Valentina Cruz")
            .teacher("Ana Morales")
            .build(),
        StudentBuilder::new("st_04", "Samuel Ortiz").grade("1°").build(),
    ]
}
