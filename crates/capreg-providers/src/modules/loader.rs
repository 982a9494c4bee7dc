//! Module catalog and the caching loader

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use capreg_application::ports::registry::MODULES;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::LoadedModule;
use capreg_domain::value_objects::Value;
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Loader producing a module handle
pub type ModuleLoaderFn = Arc<dyn Fn() -> Result<Arc<dyn LoadedModule>> + Send + Sync>;

/// Name-to-loader table
#[derive(Clone, Default)]
pub struct ModuleCatalog {
    loaders: HashMap<String, ModuleLoaderFn>,
}

impl ModuleCatalog {
    /// A catalog with no modules
    pub fn empty() -> Self {
        Self::default()
    }

    /// A catalog holding every module registered in [`MODULES`]
    pub fn discover() -> Self {
        let mut catalog = Self::empty();
        for entry in MODULES {
            let loader = entry.loader;
            catalog
                .loaders
                .entry(entry.name.to_string())
                .or_insert_with(|| Arc::new(loader));
        }
        catalog
    }

    /// Register (or replace) the loader for `name`
    pub fn register<F>(&mut self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Result<Arc<dyn LoadedModule>> + Send + Sync + 'static,
    {
        self.loaders.insert(name.into(), Arc::new(loader));
    }

    /// Builder form of [`ModuleCatalog::register`]
    pub fn with_module<F>(mut self, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LoadedModule>> + Send + Sync + 'static,
    {
        self.register(name, loader);
        self
    }

    /// Whether a loader exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Registered module names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loaders.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn loader(&self, name: &str) -> Option<&ModuleLoaderFn> {
        self.loaders.get(name)
    }
}

impl fmt::Debug for ModuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCatalog")
            .field("modules", &self.names())
            .finish()
    }
}

static SHARED: LazyLock<Arc<DeferredModuleLoader>> =
    LazyLock::new(|| Arc::new(DeferredModuleLoader::new(ModuleCatalog::discover())));

/// Import-and-cache loader
///
/// Each module name maps to its own [`OnceCell`], so concurrent first
/// lookups of one module run its loader once and different modules never
/// wait on each other. A failed load leaves the cell empty.
pub struct DeferredModuleLoader {
    catalog: ModuleCatalog,
    cache: DashMap<String, Arc<OnceCell<Arc<dyn LoadedModule>>>>,
    loads: AtomicUsize,
}

impl DeferredModuleLoader {
    /// Create a loader over `catalog`
    pub fn new(catalog: ModuleCatalog) -> Self {
        Self {
            catalog,
            cache: DashMap::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// The process-wide loader over discovered modules
    ///
    /// Every module namespace shares it, so a module is loaded once per
    /// process no matter which namespace reached it first.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// The catalog this loader draws from
    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Return the cached handle for `name`, loading it on first use
    pub async fn load_module(&self, name: &str) -> Result<Arc<dyn LoadedModule>> {
        let Some(loader) = self.catalog.loader(name) else {
            return Err(Error::module(name, "no module registered under this name"));
        };

        let cell = self
            .cache
            .entry(name.to_string())
            .or_default()
            .value()
            .clone();
        if let Some(module) = cell.get() {
            debug!(module = name, "Module cache hit");
            return Ok(Arc::clone(module));
        }

        let module = cell
            .get_or_try_init(|| async {
                self.loads.fetch_add(1, Ordering::SeqCst);
                match loader() {
                    Ok(module) => {
                        info!(module = name, "Module loaded");
                        Ok(module)
                    }
                    Err(err) => {
                        warn!(module = name, error = %err, "Module load failed");
                        Err(err)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(module))
    }

    /// Whether `name` is loaded and cached
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.get(name).is_some_and(|cell| cell.initialized())
    }

    /// Number of loader invocations so far, failed ones included
    pub fn load_attempts(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for DeferredModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredModuleLoader")
            .field("catalog", &self.catalog)
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// A module whose attributes are fixed values
#[derive(Debug, Clone)]
pub struct StaticModule {
    name: String,
    attributes: BTreeMap<String, Value>,
}

impl StaticModule {
    /// An empty module called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl LoadedModule for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }
}
