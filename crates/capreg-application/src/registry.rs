//! Backend Registry
//!
//! Owns one backend instance per namespace token for the lifetime of the
//! registry. Construction is lazy: the first request for a namespace runs
//! its factory and `initialize()`, later requests share the result.
//!
//! ## Concurrency
//!
//! Each namespace has its own [`OnceCell`] slot. Concurrent first touches of
//! the same namespace wait on that slot, so exactly one caller constructs and
//! initializes the backend; unrelated namespaces never contend. A failed
//! initialization leaves the slot empty and the next caller starts over.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use capreg_domain::error::{LookupError, Result};
use capreg_domain::ports::CapabilityBackend;
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::ports::registry::BACKENDS;

/// A constructed, initialized backend shared by all callers
pub type SharedBackend = Arc<dyn CapabilityBackend>;

/// Factory creating an uninitialized backend from configuration
pub type BackendFactory =
    Arc<dyn Fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>> + Send + Sync>;

type Slot = Arc<OnceCell<SharedBackend>>;

/// Lazy, exactly-once owner of backend instances
pub struct BackendRegistry {
    config: Arc<BackendConfig>,
    factories: HashMap<String, BackendFactory>,
    slots: DashMap<String, Slot>,
}

impl BackendRegistry {
    /// Create a registry with no backends
    pub fn empty(config: BackendConfig) -> Self {
        Self {
            config: Arc::new(config),
            factories: HashMap::new(),
            slots: DashMap::new(),
        }
    }

    /// Create a registry holding every backend registered in [`BACKENDS`]
    pub fn discover(config: BackendConfig) -> Self {
        let mut registry = Self::empty(config);
        for entry in BACKENDS {
            if registry.factories.contains_key(entry.namespace) {
                warn!(
                    namespace = entry.namespace,
                    "Duplicate backend registration ignored"
                );
                continue;
            }
            let factory = entry.factory;
            registry
                .factories
                .insert(entry.namespace.to_string(), Arc::new(factory));
        }
        info!(
            backends = registry.factories.len(),
            "Discovered capability backends"
        );
        registry
    }

    /// Register (or replace) the factory for `namespace`
    ///
    /// Replacing a factory does not touch an instance that was already
    /// constructed; call [`BackendRegistry::invalidate`] for that.
    pub fn register<F>(&mut self, namespace: impl Into<String>, factory: F)
    where
        F: Fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>> + Send + Sync + 'static,
    {
        self.factories.insert(namespace.into(), Arc::new(factory));
    }

    /// Builder form of [`BackendRegistry::register`]
    pub fn with_backend<F>(mut self, namespace: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>> + Send + Sync + 'static,
    {
        self.register(namespace, factory);
        self
    }

    /// The configuration handed to factories
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Whether any implementation serves `namespace`
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.factories.contains_key(namespace)
    }

    /// Every servable namespace, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.factories.keys().cloned().collect();
        namespaces.sort_unstable();
        namespaces
    }

    /// Whether the backend for `namespace` has been constructed and initialized
    pub fn is_constructed(&self, namespace: &str) -> bool {
        self.slots
            .get(namespace)
            .is_some_and(|slot| slot.initialized())
    }

    /// Get the backend for `namespace`, constructing it on first use
    ///
    /// Unknown namespaces fail with [`LookupError::UnknownNamespace`] without
    /// touching any slot. Construction or initialization failures surface as
    /// [`LookupError::BackendFailure`] with no segment; callers that know
    /// the path fill it in.
    pub async fn get_or_create(
        &self,
        namespace: &str,
    ) -> std::result::Result<SharedBackend, LookupError> {
        let Some(factory) = self.factories.get(namespace) else {
            return Err(LookupError::UnknownNamespace {
                namespace: namespace.to_string(),
            });
        };

        // Clone the slot so no DashMap guard is held across the await below
        let slot: Slot = self
            .slots
            .entry(namespace.to_string())
            .or_default()
            .value()
            .clone();

        if let Some(backend) = slot.get() {
            debug!(namespace, "Backend cache hit");
            return Ok(Arc::clone(backend));
        }

        let backend = slot
            .get_or_try_init(|| self.construct(namespace, factory))
            .await
            .map_err(|err| LookupError::from_backend(namespace, err, None))?;
        Ok(Arc::clone(backend))
    }

    async fn construct(&self, namespace: &str, factory: &BackendFactory) -> Result<SharedBackend> {
        let mut backend = factory(&self.config)?;
        if let Err(err) = backend.initialize().await {
            warn!(namespace, error = %err, "Backend initialization failed");
            return Err(err);
        }
        info!(namespace, "Backend constructed and initialized");
        Ok(Arc::from(backend))
    }

    /// Drop the constructed backend for `namespace`
    ///
    /// The next request constructs and initializes a fresh instance, which
    /// is how a configuration snapshot gets reloaded. Callers still holding
    /// the old instance keep using it. A slot whose construction is still
    /// running is left alone, so it never initializes twice concurrently.
    /// Returns whether an instance was dropped.
    pub fn invalidate(&self, namespace: &str) -> bool {
        let removed = self
            .slots
            .remove_if(namespace, |_, slot| slot.initialized())
            .is_some();
        if removed {
            info!(namespace, "Backend invalidated");
        }
        removed
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("namespaces", &self.namespaces())
            .field("constructed", &self.slots.len())
            .finish()
    }
}
