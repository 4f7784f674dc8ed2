// ==========================================
// PIAR Portal - user accounts
// ==========================================
// Key: username (unique across all users)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::Role;

// ==========================================
// User
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String, // display name; students reference teachers by this
    pub email: String,
    pub role: Role,
    pub password: String,

    // ===== role-specific attributes =====
    pub student_id: Option<String>,     // family: assigned student
    pub specialization: Option<String>, // teacher: area / subject
    pub phone: Option<String>,

    pub created_at: NaiveDateTime,
}

impl User {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Copy without the password, for anything that leaves the core.
    pub fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

// ==========================================
// NewUser - account creation input
// ==========================================
/// Fields an administrator fills in when creating an account.
/// Username and password are assigned by the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub student_id: Option<String>,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

// ==========================================
// RegistrationForm - self sign-up input
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub student_id: Option<String>,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}
