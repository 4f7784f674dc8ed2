// ==========================================
// PIAR Portal - dashboard API
// ==========================================
// Aggregates over the viewer's role-scoped students only.
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::domain::user::User;
use crate::engine::dashboard::{summarize, DashboardSummary, RECENT_PROGRESS_LIMIT};
use crate::engine::visibility::scope_students;
use crate::repository::StudentRepository;

pub struct DashboardApi {
    students: Arc<StudentRepository>,
}

impl DashboardApi {
    pub fn new(students: Arc<StudentRepository>) -> Self {
        Self { students }
    }

    /// Summary of what `viewer` is allowed to see.
    pub fn summary(&self, viewer: &User) -> ApiResult<DashboardSummary> {
        let snapshot = self.students.list()?;
        let scoped = scope_students(&snapshot.items, viewer);
        Ok(summarize(&scoped, RECENT_PROGRESS_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student::Student;
    use crate::domain::types::{RiskLevel, Role};

    fn viewer(role: Role, name: &str) -> User {
        User {
            id: format!("usr_{}", name),
            username: name.to_lowercase(),
            name: name.to_string(),
            email: format!("{}@colegio.edu", name.to_lowercase()),
            role,
            password: String::new(),
            student_id: None,
            specialization: None,
            phone: None,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    #[test]
    fn test_summary_respects_scope() {
        let mut a = Student::new("st_01", "Sofía Gómez", "3°");
        a.teacher = Some("Ana".to_string());
        a.risk_level = RiskLevel::High;
        let b = Student::new("st_02", "Mateo Ríos", "5°");
        let api = DashboardApi::new(Arc::new(StudentRepository::new(vec![a, b])));

        let teacher = api.summary(&viewer(Role::Teacher, "Ana")).unwrap();
        assert_eq!(teacher.total_students, 1);
        assert_eq!(teacher.by_risk.high, 1);
        assert_eq!(teacher.unassigned_students, 0);

        let director = api.summary(&viewer(Role::Director, "Dora")).unwrap();
        assert_eq!(director.total_students, 2);
        assert_eq!(director.unassigned_students, 1);
    }
}
