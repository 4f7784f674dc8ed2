// ==========================================
// PIAR Portal - authentication API
// ==========================================
// login / register / reset_password
// The auth provider decides success; the profile comes from the users
// collection.
// ==========================================

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::accounts::{is_plausible_email, AccountDraft, AccountProvisioner};
use crate::api::error::{ApiError, ApiResult, Service, ValidationIssue};
use crate::collaborators::auth::AuthProvider;
use crate::config::ConfigManager;
use crate::domain::user::{RegistrationForm, User};
use crate::repository::{StudentRepository, UserRepository};

pub struct AuthApi {
    users: Arc<UserRepository>,
    auth: Arc<dyn AuthProvider>,
    config: Arc<ConfigManager>,
    provisioner: AccountProvisioner,
}

impl AuthApi {
    pub fn new(
        users: Arc<UserRepository>,
        students: Arc<StudentRepository>,
        auth: Arc<dyn AuthProvider>,
        config: Arc<ConfigManager>,
    ) -> Self {
        let provisioner = AccountProvisioner::new(users.clone(), students, auth.clone());
        Self {
            users,
            auth,
            config,
            provisioner,
        }
    }

    /// Sign in with an email or a username.
    ///
    /// # Returns
    /// - Ok(User): the signed-in profile
    /// - Err(ApiError::InvalidCredentials): unknown username or wrong password
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<User> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ApiError::required("email"));
        }
        if password.is_empty() {
            return Err(ApiError::required("password"));
        }

        let email = if identifier.contains('@') {
            identifier.to_lowercase()
        } else {
            match self.users.find_by_username(identifier)? {
                Some(user) => user.email,
                None => {
                    warn!(identifier, "login with unknown username");
                    return Err(ApiError::InvalidCredentials);
                }
            }
        };

        let session = self
            .auth
            .sign_in(&email, password)
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Auth, e))?;

        let user = self
            .users
            .find_by_email(&session.email)?
            .ok_or_else(|| ApiError::not_found("User", &session.email))?;

        info!(username = %user.username, role = %user.role, "signed in");
        Ok(user)
    }

    /// Self sign-up. The username is derived from the display name.
    pub async fn register(&self, form: RegistrationForm) -> ApiResult<User> {
        if form.password.is_empty() {
            return Err(ApiError::required("password"));
        }
        let min = self.config.current()?.min_password_len;
        if form.password.chars().count() < min {
            return Err(ApiError::validation(ValidationIssue::PasswordTooShort { min }));
        }
        if form.password != form.confirm_password {
            return Err(ApiError::validation(ValidationIssue::PasswordsDoNotMatch));
        }

        self.provisioner
            .provision(AccountDraft {
                name: form.name,
                email: form.email,
                role: form.role,
                password: form.password,
                student_id: form.student_id,
                specialization: form.specialization,
                phone: form.phone,
            })
            .await
    }

    pub async fn reset_password(&self, email: &str) -> ApiResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::required("email"));
        }
        if !is_plausible_email(email) {
            return Err(ApiError::validation(ValidationIssue::InvalidEmail(email.to_string())));
        }
        self.auth
            .reset_password(email)
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Auth, e))?;

        info!(email, "password reset requested");
        Ok(())
    }
}
