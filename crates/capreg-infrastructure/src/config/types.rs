//! Configuration types

use std::path::PathBuf;

use capreg_application::BackendConfig;
use capreg_domain::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_CONFIG_FILE, DEFAULT_RESERVED_PREFIX, DEFAULT_STORAGE_FILE,
    SETTING_API_TIMEOUT_SECS, SETTING_RESERVED_PREFIX,
};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_LEVEL;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolled file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Everything the process-wide router is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// JSON file served by the `config` namespace
    pub config_file: String,

    /// File backing the `storage` namespace
    pub storage_file: String,

    /// Model data source for the `models` namespace
    pub db_url: Option<String>,

    /// Base URL for the `api` namespace
    pub api_base_url: Option<String>,

    /// Request timeout for the `api` namespace, in seconds
    pub api_timeout_secs: u64,

    /// Namespace tokens starting with this prefix are rejected
    pub reserved_prefix: String,

    /// Logging setup
    pub logging: LoggingConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
            db_url: None,
            api_base_url: None,
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Flatten into the settings map handed to backend factories
    pub fn to_backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::new()
            .with_config_file(&self.config_file)
            .with_storage_file(&self.storage_file)
            .with(SETTING_API_TIMEOUT_SECS, self.api_timeout_secs.to_string())
            .with(SETTING_RESERVED_PREFIX, &self.reserved_prefix);
        if let Some(url) = &self.db_url {
            config = config.with_db_url(url);
        }
        if let Some(url) = &self.api_base_url {
            config = config.with_api_base_url(url);
        }
        config
    }
}
