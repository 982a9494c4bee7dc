//! Environment variable backend
//!
//! `env.NAME` returns the variable's value as a string, or the caller's
//! default (`null` when none was given) if it is unset. Absence is never an
//! error.

use async_trait::async_trait;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::NS_ENV;
use capreg_domain::error::Result;
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;

/// Backend serving the `env` namespace
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvAccessor;

impl EnvAccessor {
    /// Create an environment accessor
    pub fn new() -> Self {
        Self
    }

    /// Read a variable, replacing non-UTF-8 bytes
    pub fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }

    /// Read a variable with a default
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }
}

#[async_trait]
impl CapabilityBackend for EnvAccessor {
    fn namespace(&self) -> &str {
        NS_ENV
    }

    fn setting(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let name = lookup.single("an environment variable name")?;
        Ok(self
            .get(name)
            .map(Value::String)
            .unwrap_or_else(|| lookup.default_value()))
    }
}

#[linkme::distributed_slice(BACKENDS)]
static ENV_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_ENV,
    description: "Process environment variables with default-on-absence",
    factory: |_config| Ok(Box::new(EnvAccessor::new())),
};
