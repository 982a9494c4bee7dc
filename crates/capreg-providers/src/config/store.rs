//! JSON configuration store
//!
//! Loads a JSON tree from a file relative to the working directory (or an
//! explicit base directory) and walks path segments as nested keys.
//!
//! ## Behavior
//!
//! - A missing file yields an empty tree, not an error
//! - Invalid JSON fails initialization
//! - Snapshots are immutable once loaded; reloading means invalidating the
//!   `config` namespace so a fresh store is constructed

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use capreg_application::BackendConfig;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::NS_CONFIG;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::utils::walk;

/// Snapshots keyed by configuration file name, each loaded at most once
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: DashMap<String, Arc<OnceCell<Arc<Value>>>>,
}

impl SnapshotCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the snapshot for `name`, loading it from `path` on first use
    ///
    /// Concurrent first requests for the same name share one load. A failed
    /// load is not cached.
    pub async fn get_or_load(&self, name: &str, path: &Path) -> Result<Arc<Value>> {
        let cell = self
            .entries
            .entry(name.to_string())
            .or_default()
            .value()
            .clone();
        let snapshot = cell
            .get_or_try_init(|| async { load_snapshot(path).await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(snapshot))
    }

    /// Whether a snapshot for `name` has been loaded
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|cell| cell.initialized())
    }
}

async fn load_snapshot(path: &Path) -> Result<Value> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Configuration file not found, using empty tree");
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Err(err) => {
            return Err(Error::io_with_source(
                format!("Failed to read configuration file {}", path.display()),
                err,
            ));
        }
    };

    let tree = serde_json::from_str(&raw).map_err(|err| {
        Error::configuration_with_source(
            format!("Invalid JSON in configuration file {}", path.display()),
            err,
        )
    })?;
    info!(path = %path.display(), "Configuration snapshot loaded");
    Ok(tree)
}

/// Backend serving the `config` namespace
#[derive(Debug)]
pub struct ConfigStore {
    file_name: String,
    base_dir: Option<PathBuf>,
    snapshots: SnapshotCache,
    active: Arc<Value>,
}

impl ConfigStore {
    /// Create a store reading `file_name` relative to the working directory
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            base_dir: None,
            snapshots: SnapshotCache::new(),
            active: Arc::new(Value::Object(serde_json::Map::new())),
        }
    }

    /// Resolve relative file names against `dir` instead of the working directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The configuration file this store serves
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of a configuration file name
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        let base = self
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(file_name)
    }

    /// Snapshot of any configuration file, cached by name
    pub async fn snapshot(&self, file_name: &str) -> Result<Arc<Value>> {
        let path = self.path_for(file_name);
        self.snapshots.get_or_load(file_name, &path).await
    }

    /// The snapshot loaded at initialization
    pub fn active_snapshot(&self) -> Arc<Value> {
        Arc::clone(&self.active)
    }
}

#[async_trait]
impl CapabilityBackend for ConfigStore {
    fn namespace(&self) -> &str {
        NS_CONFIG
    }

    async fn initialize(&mut self) -> Result<()> {
        let file_name = self.file_name.clone();
        self.active = self.snapshot(&file_name).await?;
        Ok(())
    }

    fn setting(&self, key: &str) -> Option<String> {
        match self.active.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        match walk(&self.active, lookup.segments) {
            Ok(value) => Ok(value.clone()),
            Err(_) if lookup.default.is_some() => Ok(lookup.default_value()),
            Err(missing) => Err(Error::not_found(
                missing,
                format!("no configuration key in {}", self.file_name),
            )),
        }
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(BACKENDS)]
static CONFIG_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_CONFIG,
    description: "JSON configuration snapshot, loaded once per file name",
    factory: |config: &BackendConfig| Ok(Box::new(ConfigStore::new(config.config_file()))),
};
