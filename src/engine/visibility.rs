// ==========================================
// PIAR Portal - role-scoped views
// ==========================================
// Which students / users a role may see, and how list filters
// compose on top of the scope. Derived data only, never stored.
// ==========================================
// Teacher           -> students whose `teacher` equals the teacher's name
// Director / Admin  -> every student
// Family            -> the student matching `user.student_id` (at most one)
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::student::Student;
use crate::domain::types::{RiskLevel, Role};
use crate::domain::user::User;
use crate::repository::collection::Snapshot;

/// Students `viewer` may see. An unmatched filter yields an empty list.
pub fn scope_students(students: &[Student], viewer: &User) -> Vec<Student> {
    match viewer.role {
        Role::Director | Role::SuperAdmin => students.to_vec(),
        Role::Teacher => students
            .iter()
            .filter(|s| s.is_assigned_to(&viewer.name))
            .cloned()
            .collect(),
        Role::Family => match viewer.student_id.as_deref() {
            Some(student_id) => students
                .iter()
                .find(|s| s.id == student_id)
                .cloned()
                .into_iter()
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Users `viewer` may see on the user management screens.
///
/// SuperAdmin sees everyone, Director everyone except super admins,
/// Teacher and Family only their own account.
pub fn visible_users(users: &[User], viewer: &User) -> Vec<User> {
    match viewer.role {
        Role::SuperAdmin => users.to_vec(),
        Role::Director => users
            .iter()
            .filter(|u| u.role != Role::SuperAdmin)
            .cloned()
            .collect(),
        Role::Teacher | Role::Family => users.iter().filter(|u| u.id == viewer.id).cloned().collect(),
    }
}

// ==========================================
// StudentFilter - list filters applied after scoping
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    /// Case-insensitive match on name or diagnosis
    pub query: Option<String>,
    pub grade: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub teacher: Option<String>,
}

impl StudentFilter {
    pub fn is_empty(&self) -> bool {
        self == &StudentFilter::default()
    }

    pub fn matches(&self, student: &Student) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = student.name.to_lowercase().contains(&query)
                || student.diagnosis.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(grade) = &self.grade {
            if &student.grade != grade {
                return false;
            }
        }
        if let Some(level) = self.risk_level {
            if student.risk_level != level {
                return false;
            }
        }
        if let Some(teacher) = &self.teacher {
            if !student.is_assigned_to(teacher) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, students: &[Student]) -> Vec<Student> {
        students.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}

// ==========================================
// ScopedStudentsMemo - memoized scope derivation
// ==========================================

/// Everything about the viewer the scope depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewerKey {
    id: String,
    role: Role,
    name: String,
    student_id: Option<String>,
}

impl From<&User> for ViewerKey {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role,
            name: user.name.clone(),
            student_id: user.student_id.clone(),
        }
    }
}

/// Recomputes the scoped view only when the collection revision or the
/// viewer changes; otherwise hands back the same `Arc`.
#[derive(Debug, Default)]
pub struct ScopedStudentsMemo {
    cached: Option<(u64, ViewerKey, Arc<Vec<Student>>)>,
}

impl ScopedStudentsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(&mut self, snapshot: &Snapshot<Student>, viewer: &User) -> Arc<Vec<Student>> {
        let key = ViewerKey::from(viewer);
        if let Some((revision, cached_key, value)) = &self.cached {
            if *revision == snapshot.revision && cached_key == &key {
                return Arc::clone(value);
            }
        }

        let value = Arc::new(scope_students(&snapshot.items, viewer));
        tracing::debug!(
            revision = snapshot.revision,
            role = %viewer.role,
            visible = value.len(),
            "scoped student view recomputed"
        );
        self.cached = Some((snapshot.revision, key, Arc::clone(&value)));
        value
    }
}
