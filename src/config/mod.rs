// ==========================================
// PIAR Portal - configuration layer
// ==========================================
// Defaults -> JSON file -> environment
// ==========================================

pub mod config_manager;
pub mod portal_config;

pub use config_manager::{default_config_path, env_keys, ConfigError, ConfigManager, ConfigResult};
pub use portal_config::{AiConfig, PortalConfig, StorageConfig};
