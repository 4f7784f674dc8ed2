// ==========================================
// PIAR Portal - user administration API
// ==========================================
// Deleting a teacher unassigns their students (by display name).
// Deleting any other role has no cascade.
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::accounts::{AccountDraft, AccountProvisioner};
use crate::api::error::{ApiError, ApiResult};
use crate::collaborators::auth::AuthProvider;
use crate::config::ConfigManager;
use crate::domain::types::Role;
use crate::domain::user::{NewUser, User};
use crate::engine::credentials::initial_password;
use crate::engine::visibility::visible_users;
use crate::repository::{StudentRepository, UserRepository};

/// Outcome of a user deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeletion {
    pub user: User,
    /// Students whose teacher was cleared
    pub unassigned_students: Vec<String>,
}

pub struct UserApi {
    users: Arc<UserRepository>,
    students: Arc<StudentRepository>,
    config: Arc<ConfigManager>,
    provisioner: AccountProvisioner,
}

impl UserApi {
    pub fn new(
        users: Arc<UserRepository>,
        students: Arc<StudentRepository>,
        auth: Arc<dyn AuthProvider>,
        config: Arc<ConfigManager>,
    ) -> Self {
        let provisioner = AccountProvisioner::new(users.clone(), students.clone(), auth);
        Self {
            users,
            students,
            config,
            provisioner,
        }
    }

    /// Create an account with a generated username and the role's
    /// initial password. The returned user carries that password so the
    /// administrator can hand it over.
    pub async fn create_user(&self, new_user: NewUser) -> ApiResult<User> {
        let role = new_user.role.ok_or_else(|| ApiError::required("role"))?;
        let defaults = self.config.current()?.default_passwords;

        self.provisioner
            .provision(AccountDraft {
                name: new_user.name,
                email: new_user.email,
                role: Some(role),
                password: initial_password(role, &defaults),
                student_id: new_user.student_id,
                specialization: new_user.specialization,
                phone: new_user.phone,
            })
            .await
    }

    pub fn delete_user(&self, user_id: &str) -> ApiResult<UserDeletion> {
        let user = self.users.delete(user_id)?;

        let unassigned_students = if user.is_teacher() {
            self.students.unassign_teacher(&user.name)?
        } else {
            Vec::new()
        };

        info!(
            username = %user.username,
            role = %user.role,
            unassigned = unassigned_students.len(),
            "user deleted"
        );
        Ok(UserDeletion {
            user: user.redacted(),
            unassigned_students,
        })
    }

    /// Users the viewer may see, passwords removed.
    pub fn list_visible(&self, viewer: &User) -> ApiResult<Vec<User>> {
        let snapshot = self.users.list()?;
        Ok(visible_users(&snapshot.items, viewer)
            .iter()
            .map(User::redacted)
            .collect())
    }

    /// Teachers available for student assignment.
    pub fn list_teachers(&self) -> ApiResult<Vec<User>> {
        Ok(self
            .users
            .list_by_role(Role::Teacher)?
            .iter()
            .map(User::redacted)
            .collect())
    }
}
