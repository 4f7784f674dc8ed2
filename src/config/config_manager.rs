// ==========================================
// PIAR Portal - configuration manager
// ==========================================
// Layers: built-in defaults -> JSON file -> environment overrides
// Default file: {config_dir}/piar-portal/config.json
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

use crate::config::portal_config::PortalConfig;

/// Environment variables read on top of the file
pub mod env_keys {
    pub const LOCALE: &str = "PIAR_LOCALE";
    pub const AI_MODEL: &str = "PIAR_AI_MODEL";
    pub const AI_ENDPOINT: &str = "PIAR_AI_ENDPOINT";
    pub const STORAGE_ROOT: &str = "PIAR_STORAGE_ROOT";
    pub const STORAGE_URL: &str = "PIAR_STORAGE_URL";
}

pub const SUPPORTED_LOCALES: [&str; 2] = ["es-CO", "en"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),

    #[error("config lock poisoned")]
    Lock,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub struct ConfigManager {
    config: RwLock<PortalConfig>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// Defaults, then the default config file if present, then env.
    pub fn load() -> ConfigResult<Self> {
        match default_config_path().filter(|p| p.exists()) {
            Some(path) => Self::from_file(&path),
            None => {
                let mut config = PortalConfig::default();
                apply_env_overrides(&mut config, |key| std::env::var(key).ok());
                validate(&config)?;
                Ok(Self::new(config, None))
            }
        }
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: PortalConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        validate(&config)?;

        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(Self::new(config, Some(path.to_path_buf())))
    }

    /// Use `config` as is (tests, embedding).
    pub fn from_config(config: PortalConfig) -> ConfigResult<Self> {
        validate(&config)?;
        Ok(Self::new(config, None))
    }

    fn new(config: PortalConfig, source: Option<PathBuf>) -> Self {
        Self {
            config: RwLock::new(config),
            source,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Snapshot of the current values.
    pub fn current(&self) -> ConfigResult<PortalConfig> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| ConfigError::Lock)
    }

    /// Validate and swap in `config`.
    pub fn update(&self, config: PortalConfig) -> ConfigResult<()> {
        validate(&config)?;
        let mut guard = self.config.write().map_err(|_| ConfigError::Lock)?;
        *guard = config;
        Ok(())
    }

    /// API key from the environment variable named in the AI settings.
    pub fn ai_api_key(&self) -> ConfigResult<Option<String>> {
        let env_name = self.current()?.ai.api_key_env;
        Ok(std::env::var(env_name).ok().filter(|k| !k.trim().is_empty()))
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let config = self.current()?;
        let raw = serde_json::to_string_pretty(&config).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, raw).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("piar-portal").join("config.json"))
}

/// Apply environment overrides through `lookup` (std::env in production).
pub fn apply_env_overrides(config: &mut PortalConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(locale) = lookup(env_keys::LOCALE) {
        config.locale = locale;
    }
    if let Some(model) = lookup(env_keys::AI_MODEL) {
        config.ai.model = model;
    }
    if let Some(endpoint) = lookup(env_keys::AI_ENDPOINT) {
        config.ai.endpoint = endpoint;
    }
    if let Some(root) = lookup(env_keys::STORAGE_ROOT) {
        config.storage.local_root = Some(PathBuf::from(root));
    }
    if let Some(url) = lookup(env_keys::STORAGE_URL) {
        config.storage.public_base_url = url;
    }
}

pub fn validate(config: &PortalConfig) -> ConfigResult<()> {
    if !SUPPORTED_LOCALES.contains(&config.locale.as_str()) {
        return Err(ConfigError::Invalid(format!("unsupported locale: {}", config.locale)));
    }
    for (name, value) in [
        ("ai.planTemperature", config.ai.plan_temperature),
        ("ai.strategyTemperature", config.ai.strategy_temperature),
        ("ai.chatTemperature", config.ai.chat_temperature),
    ] {
        if !(0.0..=2.0).contains(&value) {
            return Err(ConfigError::Invalid(format!("{} out of range: {}", name, value)));
        }
    }
    if config.assistant_history_limit == 0 {
        return Err(ConfigError::Invalid("assistantHistoryLimit must be positive".to_string()));
    }
    if config.min_password_len == 0 {
        return Err(ConfigError::Invalid("minPasswordLen must be positive".to_string()));
    }
    Ok(())
}
