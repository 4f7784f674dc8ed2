// ==========================================
// PIAR Portal - user repository
// ==========================================
// Invariant: username and email unique across all users
// ==========================================

use std::collections::HashSet;

use crate::domain::types::Role;
use crate::domain::user::User;
use crate::engine::username::generate_username;
use crate::repository::collection::{Collection, Keyed, Snapshot};
use crate::repository::error::{RepositoryError, RepositoryResult};

const ENTITY: &str = "User";

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Collection::new(users),
        }
    }

    pub fn list(&self) -> RepositoryResult<Snapshot<User>> {
        self.users.snapshot()
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        self.users.find(id)
    }

    pub fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let wanted = username.trim().to_lowercase();
        Ok(self
            .list()?
            .items
            .iter()
            .find(|u| u.username == wanted)
            .cloned())
    }

    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let wanted = email.trim();
        Ok(self
            .list()?
            .items
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(wanted))
            .cloned())
    }

    pub fn list_by_role(&self, role: Role) -> RepositoryResult<Vec<User>> {
        Ok(self
            .list()?
            .items
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    /// Insert `user` under a handle derived from its display name. The
    /// handle is picked against the live collection inside the write, so
    /// two concurrent inserts of the same name never get the same one.
    pub fn insert_with_generated_username(&self, mut user: User) -> RepositoryResult<User> {
        self.users.mutate(|items| {
            if items.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "email {} already registered",
                    user.email
                )));
            }
            let taken: HashSet<String> = items.iter().map(|u| u.username.clone()).collect();
            user.username = generate_username(&user.name, &taken).ok_or_else(|| {
                RepositoryError::ValidationError(format!("no username for '{}'", user.name))
            })?;
            items.push(user.clone());
            Ok(user)
        })
    }

    /// Remove the user and return it.
    pub fn delete(&self, id: &str) -> RepositoryResult<User> {
        self.users.mutate(|items| {
            let index = items
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
            Ok(items.remove(index))
        })
    }
}
