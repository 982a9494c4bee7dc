//! Persistent key-value backend
//!
//! A single JSON file holding one object. Every [`KeyValueStore::get`] and
//! [`KeyValueStore::set`] opens the file, operates and closes it again;
//! nothing is cached in memory.
//!
//! ## Limitations
//!
//! - `set` is read-modify-write of the whole file with no locking, so
//!   concurrent writers race and the last one wins
//! - A crash mid-write can leave a truncated file behind

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use capreg_application::BackendConfig;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::{NS_STORAGE, SETTING_STORAGE_FILE};
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;
use serde_json::Map;
use tracing::debug;

/// Backend serving the `storage` namespace
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(Error::io_with_source(
                    format!("Failed to open store {}", self.path.display()),
                    err,
                ));
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(Error::io(format!(
                "Store {} does not hold a JSON object",
                self.path.display()
            ))),
            Err(err) => Err(Error::io_with_source(
                format!("Store {} is corrupt", self.path.display()),
                err,
            )),
        }
    }

    /// Stored value for `key`, or `default` when absent
    pub async fn get(&self, key: &str, default: Value) -> Result<Value> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key).unwrap_or(default))
    }

    /// Write `value` under `key`
    pub async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        let encoded = serde_json::to_vec_pretty(&Value::Object(map))?;
        tokio::fs::write(&self.path, encoded).await.map_err(|err| {
            Error::io_with_source(
                format!("Failed to write store {}", self.path.display()),
                err,
            )
        })?;
        debug!(key, path = %self.path.display(), "Stored value");
        Ok(())
    }
}

#[async_trait]
impl CapabilityBackend for KeyValueStore {
    fn namespace(&self) -> &str {
        NS_STORAGE
    }

    async fn initialize(&mut self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::configuration("storage file name must not be empty"));
        }
        Ok(())
    }

    fn setting(&self, key: &str) -> Option<String> {
        (key == SETTING_STORAGE_FILE).then(|| self.path.display().to_string())
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let key = lookup.single("a storage key")?;
        self.get(key, lookup.default_value()).await
    }

    fn writable(&self) -> bool {
        true
    }

    async fn assign(&self, segments: &[String], value: Value) -> Result<()> {
        let key = Lookup::new(segments).single("a storage key")?;
        self.set(key, value).await
    }
}

#[linkme::distributed_slice(BACKENDS)]
static STORAGE_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_STORAGE,
    description: "Persistent single-file key-value store",
    factory: |config: &BackendConfig| Ok(Box::new(KeyValueStore::new(config.storage_file()))),
};
