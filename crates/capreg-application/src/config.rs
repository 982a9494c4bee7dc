//! Backend configuration
//!
//! The flattened view of settings handed to every backend factory. The
//! infrastructure layer builds it from the loaded application config, so
//! backends never depend on a particular configuration library.

use std::collections::BTreeMap;

use capreg_domain::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_CONFIG_FILE, DEFAULT_RESERVED_PREFIX, DEFAULT_STORAGE_FILE,
    SETTING_API_BASE_URL, SETTING_API_TIMEOUT_SECS, SETTING_CONFIG_FILE, SETTING_DB_URL,
    SETTING_RESERVED_PREFIX, SETTING_STORAGE_FILE,
};
use serde::{Deserialize, Serialize};

/// Settings available to backend factories
///
/// Backends use what they need and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    settings: BTreeMap<String, String>,
}

impl BackendConfig {
    /// Create an empty config; typed accessors fall back to defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a setting
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Set the configuration snapshot file
    pub fn with_config_file(self, file: impl Into<String>) -> Self {
        self.with(SETTING_CONFIG_FILE, file)
    }

    /// Set the persistent store file
    pub fn with_storage_file(self, file: impl Into<String>) -> Self {
        self.with(SETTING_STORAGE_FILE, file)
    }

    /// Set the model data source location
    pub fn with_db_url(self, url: impl Into<String>) -> Self {
        self.with(SETTING_DB_URL, url)
    }

    /// Set the HTTP client base URL
    pub fn with_api_base_url(self, url: impl Into<String>) -> Self {
        self.with(SETTING_API_BASE_URL, url)
    }

    /// Raw setting lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Raw setting lookup with a default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Configuration snapshot file name
    pub fn config_file(&self) -> &str {
        self.get_or(SETTING_CONFIG_FILE, DEFAULT_CONFIG_FILE)
    }

    /// Persistent store file name
    pub fn storage_file(&self) -> &str {
        self.get_or(SETTING_STORAGE_FILE, DEFAULT_STORAGE_FILE)
    }

    /// Model data source location, if configured
    pub fn db_url(&self) -> Option<&str> {
        self.get(SETTING_DB_URL).filter(|url| !url.is_empty())
    }

    /// HTTP client base URL, if configured
    pub fn api_base_url(&self) -> Option<&str> {
        self.get(SETTING_API_BASE_URL).filter(|url| !url.is_empty())
    }

    /// HTTP client timeout in seconds
    pub fn api_timeout_secs(&self) -> u64 {
        self.get(SETTING_API_TIMEOUT_SECS)
            .and_then(|secs| secs.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS)
    }

    /// Reserved namespace marker
    pub fn reserved_prefix(&self) -> &str {
        self.get_or(SETTING_RESERVED_PREFIX, DEFAULT_RESERVED_PREFIX)
    }

    /// Iterate over all explicit settings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
