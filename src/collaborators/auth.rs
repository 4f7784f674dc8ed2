// ==========================================
// PIAR Portal - auth/session provider
// ==========================================
// The core only reacts to success or failure of these calls.
// ==========================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::collaborators::error::{CollaboratorError, CollaboratorResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub email: String,
    pub access_token: String,
    pub issued_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAccount {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> CollaboratorResult<AuthSession>;

    async fn sign_up(&self, request: SignUpRequest) -> CollaboratorResult<AuthAccount>;

    async fn reset_password(&self, email: &str) -> CollaboratorResult<()>;
}

// ==========================================
// InMemoryAuthProvider
// ==========================================
/// Accounts keyed by lowercased email. Used by the desktop shell when no
/// hosted provider is configured, and by tests.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    accounts: Mutex<HashMap<String, String>>,
    reset_requests: Mutex<Vec<String>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emails for which a password reset was requested, oldest first.
    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lock_accounts(
        &self,
    ) -> CollaboratorResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.accounts
            .lock()
            .map_err(|e| CollaboratorError::Internal(format!("account lock poisoned: {}", e)))
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> CollaboratorResult<AuthSession> {
        let key = email.trim().to_lowercase();
        let accounts = self.lock_accounts()?;
        match accounts.get(&key) {
            Some(stored) if stored == password => Ok(AuthSession {
                email: key,
                access_token: uuid::Uuid::new_v4().to_string(),
                issued_at: chrono::Local::now().naive_local(),
            }),
            _ => Err(CollaboratorError::InvalidCredentials),
        }
    }

    async fn sign_up(&self, request: SignUpRequest) -> CollaboratorResult<AuthAccount> {
        let key = request.email.trim().to_lowercase();
        let mut accounts = self.lock_accounts()?;
        if accounts.contains_key(&key) {
            return Err(CollaboratorError::AccountExists(key));
        }
        accounts.insert(key.clone(), request.password);
        Ok(AuthAccount { email: key })
    }

    async fn reset_password(&self, email: &str) -> CollaboratorResult<()> {
        let key = email.trim().to_lowercase();
        if !self.lock_accounts()?.contains_key(&key) {
            return Err(CollaboratorError::AccountNotFound(key));
        }
        self.reset_requests
            .lock()
            .map_err(|e| CollaboratorError::Internal(e.to_string()))?
            .push(key);
        Ok(())
    }
}
