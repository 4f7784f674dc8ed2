// ==========================================
// PIAR Portal - default credentials
// ==========================================
// Placeholder onboarding: a well-known password per role, or a random
// 8-character token when the role has none configured. Not hardened.
// ==========================================

use std::collections::HashMap;

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::domain::types::Role;

/// Length of generated passwords
pub const GENERATED_PASSWORD_LEN: usize = 8;

/// Initial password for a new account of `role`.
pub fn initial_password(role: Role, defaults: &HashMap<Role, String>) -> String {
    match defaults.get(&role).filter(|p| !p.is_empty()) {
        Some(password) => password.clone(),
        None => random_token(GENERATED_PASSWORD_LEN),
    }
}

pub fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
