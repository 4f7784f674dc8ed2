// ==========================================
// PIAR Portal - configuration values
// ==========================================
// Every field has a default; a config file only needs the keys it
// overrides (serde default on each struct).
// ==========================================

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::types::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalConfig {
    /// UI / message locale ("es-CO" or "en")
    pub locale: String,
    pub ai: AiConfig,
    pub storage: StorageConfig,
    /// Initial password per role; a role without entry gets a random token
    pub default_passwords: HashMap<Role, String>,
    pub min_password_len: usize,
    /// Chat turns kept by the assistant (user + assistant messages)
    pub assistant_history_limit: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            locale: "es-CO".to_string(),
            ai: AiConfig::default(),
            storage: StorageConfig::default(),
            default_passwords: HashMap::from([
                (Role::Teacher, "docente123".to_string()),
                (Role::Family, "familia123".to_string()),
                (Role::Director, "directivo123".to_string()),
            ]),
            min_password_len: 6,
            assistant_history_limit: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub plan_temperature: f32,
    pub strategy_temperature: f32,
    pub chat_temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            plan_temperature: 0.4,
            strategy_temperature: 0.7,
            chat_temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    pub public_base_url: String,
    /// Directory for local object storage; in-memory storage when unset
    pub local_root: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_base_url: "memory://piar-portal".to_string(),
            local_root: None,
        }
    }
}
