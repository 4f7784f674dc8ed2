// ==========================================
// PIAR Portal - account provisioning
// ==========================================
// Shared by self-registration (AuthApi) and admin creation (UserApi):
// validate -> reserve profile + username -> auth sign-up (undo on failure)
// ==========================================

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult, Service, ValidationIssue};
use crate::collaborators::auth::{AuthProvider, SignUpRequest};
use crate::domain::types::Role;
use crate::domain::user::User;
use crate::engine::username::base_username;
use crate::repository::{StudentRepository, UserRepository};

/// Validated account fields, password already decided.
#[derive(Debug, Clone)]
pub(crate) struct AccountDraft {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub password: String,
    pub student_id: Option<String>,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

pub(crate) struct AccountProvisioner {
    users: Arc<UserRepository>,
    students: Arc<StudentRepository>,
    auth: Arc<dyn AuthProvider>,
}

impl AccountProvisioner {
    pub fn new(
        users: Arc<UserRepository>,
        students: Arc<StudentRepository>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self { users, students, auth }
    }

    /// Checks that need no collaborator call. Runs before anything else
    /// so a rejected form never reaches the auth provider.
    pub fn check(&self, draft: &AccountDraft) -> ApiResult<Role> {
        if draft.name.trim().is_empty() {
            return Err(ApiError::required("name"));
        }
        if draft.email.trim().is_empty() {
            return Err(ApiError::required("email"));
        }
        if !is_plausible_email(&draft.email) {
            return Err(ApiError::validation(ValidationIssue::InvalidEmail(
                draft.email.clone(),
            )));
        }
        let role = draft.role.ok_or_else(|| ApiError::required("role"))?;

        if let Some(student_id) = non_blank(&draft.student_id) {
            if self.students.find_by_id(&student_id)?.is_none() {
                return Err(ApiError::validation(ValidationIssue::UnknownStudent(student_id)));
            }
        }
        if self.users.find_by_email(draft.email.trim())?.is_some() {
            return Err(ApiError::AccountExists(draft.email.trim().to_lowercase()));
        }
        Ok(role)
    }

    /// Reserve the profile (with its username) first, then sign up with
    /// the auth provider. A failed sign-up removes the reservation so the
    /// same form can be submitted again.
    pub async fn provision(&self, draft: AccountDraft) -> ApiResult<User> {
        let role = self.check(&draft)?;
        let name = draft.name.trim().to_string();
        if base_username(&name).is_none() {
            return Err(ApiError::validation(ValidationIssue::UsernameUnavailable(name)));
        }

        let user = self.users.insert_with_generated_username(User {
            id: format!("usr_{}", uuid::Uuid::new_v4().simple()),
            username: String::new(),
            name,
            email: draft.email.trim().to_lowercase(),
            role,
            password: draft.password,
            student_id: non_blank(&draft.student_id),
            specialization: non_blank(&draft.specialization),
            phone: non_blank(&draft.phone),
            created_at: chrono::Local::now().naive_local(),
        })?;

        let signed_up = self
            .auth
            .sign_up(SignUpRequest {
                email: user.email.clone(),
                password: user.password.clone(),
                display_name: user.name.clone(),
            })
            .await;
        if let Err(e) = signed_up {
            if let Err(rollback) = self.users.delete(&user.id) {
                warn!(username = %user.username, error = %rollback, "could not release reserved account");
            }
            return Err(ApiError::from_collaborator(Service::Auth, e));
        }

        info!(username = %user.username, role = %user.role, "account created");
        Ok(user)
    }
}

/// One '@', something before it, a dotted domain after it, no spaces.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::auth::InMemoryAuthProvider;
    use crate::domain::student::Student;

    fn provisioner() -> AccountProvisioner {
        AccountProvisioner::new(
            Arc::new(UserRepository::new(Vec::new())),
            Arc::new(StudentRepository::new(vec![Student::new("st_01", "Sofía Gómez", "3°")])),
            Arc::new(InMemoryAuthProvider::new()),
        )
    }

    fn draft(name: &str, email: &str) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            email: email.to_string(),
            role: Some(Role::Teacher),
            password: "docente123".to_string(),
            student_id: None,
            specialization: Some("  ".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("ana.morales@colegio.edu.co"));
        assert!(!is_plausible_email("ana.morales"));
        assert!(!is_plausible_email("ana@colegio"));
        assert!(!is_plausible_email("ana @colegio.edu"));
        assert!(!is_plausible_email("@colegio.edu"));
        assert!(!is_plausible_email("a@b@colegio.edu"));
    }

    #[tokio::test]
    async fn test_colliding_names_get_suffixes() {
        let provisioner = provisioner();
        let first = provisioner
            .provision(draft("Maria Fernanda Lopez", "maria1@colegio.edu"))
            .await
            .unwrap();
        let second = provisioner
            .provision(draft("Maria Fernanda Lopez", "maria2@colegio.edu"))
            .await
            .unwrap();
        assert_eq!(first.username, "mlopez");
        assert_eq!(second.username, "mlopez2");
        assert_eq!(first.specialization, None);
    }

    #[tokio::test]
    async fn test_rejections_before_sign_up() {
        let provisioner = provisioner();

        let err = provisioner.provision(draft("   ", "x@colegio.edu")).await.unwrap_err();
        assert!(err.is_validation());

        let mut no_role = draft("Ana Morales", "ana@colegio.edu");
        no_role.role = None;
        assert!(provisioner.provision(no_role).await.unwrap_err().is_validation());

        let mut unknown = draft("Ana Morales", "ana@colegio.edu");
        unknown.student_id = Some("st_99".to_string());
        let err = provisioner.provision(unknown).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationIssue::UnknownStudent(ref id)) if id == "st_99"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let provisioner = provisioner();
        provisioner
            .provision(draft("Ana Morales", "ana@colegio.edu"))
            .await
            .unwrap();
        let err = provisioner
            .provision(draft("Ana Morales", "ANA@colegio.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AccountExists(_)));
    }

    #[tokio::test]
    async fn test_failed_sign_up_releases_username() {
        let auth = Arc::new(InMemoryAuthProvider::new());
        auth.sign_up(SignUpRequest {
            email: "taken@colegio.edu".to_string(),
            password: "x".to_string(),
            display_name: "Otra".to_string(),
        })
        .await
        .unwrap();
        let users = Arc::new(UserRepository::new(Vec::new()));
        let provisioner = AccountProvisioner::new(
            users.clone(),
            Arc::new(StudentRepository::new(Vec::new())),
            auth,
        );

        let err = provisioner
            .provision(draft("Maria Fernanda Lopez", "taken@colegio.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AccountExists(_)));
        assert!(users.list().unwrap().items.is_empty());

        let retried = provisioner
            .provision(draft("Maria Fernanda Lopez", "maria@colegio.edu"))
            .await
            .unwrap();
        assert_eq!(retried.username, "mlopez");
    }
}
