//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//!
//! 1. Defaults from [`RegistryConfig::default`]
//! 2. TOML file: the explicit path, else the first `capreg.toml` found in
//!    the working directory or the user config directory
//! 3. Unprefixed legacy variables (`CONFIG_FILE`, `STORAGE_FILE`, `DB_URL`,
//!    `API_BASE_URL`, `LOG_LEVEL`, `LOG_FILE`)
//! 4. `CAPREG_`-prefixed variables, `__` separating nested keys
//!    (e.g. `CAPREG_LOGGING__LEVEL`)
//!
//! A `.env` file in the working directory is read into the environment
//! before any of that.

use std::env;
use std::path::{Path, PathBuf};

use capreg_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    LEGACY_ENV_KEYS,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Whether to read `.env` first
    dotenv: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            dotenv: true,
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip reading `.env`
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv = false;
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<RegistryConfig> {
        if self.dotenv {
            match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "Loaded .env"),
                Err(err) if err.not_found() => {}
                Err(err) => {
                    return Err(Error::configuration_with_source("Failed to read .env", err));
                }
            }
        }

        let config: RegistryConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_config(&config)?;
        Ok(config)
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(RegistryConfig::default()));

        let file = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => Self::find_default_config_path(),
        };
        if let Some(path) = file {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                log_config_loaded(&path, true);
            } else {
                log_config_loaded(&path, false);
            }
        }

        let legacy = Env::raw().filter_map(|key| {
            LEGACY_ENV_KEYS
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, target)| (*target).into())
        });

        figment
            .merge(legacy)
            .merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split(CONFIG_ENV_SEPARATOR))
    }

    /// Save configuration to file as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &RegistryConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let candidates = [
            env::current_dir()
                .ok()
                .map(|dir| dir.join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_config(config: &RegistryConfig) -> Result<()> {
    if config.config_file.trim().is_empty() {
        return Err(Error::configuration("config_file cannot be empty"));
    }
    if config.storage_file.trim().is_empty() {
        return Err(Error::configuration("storage_file cannot be empty"));
    }
    if config.reserved_prefix.is_empty() {
        return Err(Error::configuration("reserved_prefix cannot be empty"));
    }
    parse_log_level(&config.logging.level)?;
    Ok(())
}
