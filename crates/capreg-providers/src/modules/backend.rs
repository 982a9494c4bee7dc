//! Module namespaces
//!
//! `modules.<module path>.<attribute>` loads `<module path>` and returns one
//! attribute. `services.*` and `utils.*` do the same with the namespace
//! token kept as the module name's first component, so
//! `services.billing.rate` reads `rate` from module `services.billing`.

use std::sync::Arc;

use async_trait::async_trait;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::{NS_MODULES, NS_SERVICES, NS_UTILS, PATH_SEPARATOR};
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;

use super::loader::DeferredModuleLoader;

/// Backend resolving module attributes
#[derive(Debug)]
pub struct ModuleBackend {
    namespace: &'static str,
    prefix: Option<&'static str>,
    loader: Arc<DeferredModuleLoader>,
}

impl ModuleBackend {
    /// Serve the generic `modules` namespace
    pub fn modules(loader: Arc<DeferredModuleLoader>) -> Self {
        Self {
            namespace: NS_MODULES,
            prefix: None,
            loader,
        }
    }

    /// Serve `namespace`, prefixing module names with it
    pub fn prefixed(namespace: &'static str, loader: Arc<DeferredModuleLoader>) -> Self {
        Self {
            namespace,
            prefix: Some(namespace),
            loader,
        }
    }

    /// The loader behind this backend
    pub fn loader(&self) -> &Arc<DeferredModuleLoader> {
        &self.loader
    }

    fn module_name(&self, path: &[String]) -> String {
        let separator = PATH_SEPARATOR.to_string();
        let joined = path.join(&separator);
        match self.prefix {
            Some(prefix) => format!("{prefix}{PATH_SEPARATOR}{joined}"),
            None => joined,
        }
    }
}

#[async_trait]
impl CapabilityBackend for ModuleBackend {
    fn namespace(&self) -> &str {
        self.namespace
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let Some((attribute, path)) = lookup.segments.split_last() else {
            return Err(Error::invalid_argument("", "expected <module>.<attribute>"));
        };
        if path.is_empty() {
            return Err(Error::invalid_argument(
                attribute.as_str(),
                "expected <module>.<attribute>",
            ));
        }

        let name = self.module_name(path);
        let module = self.loader.load_module(&name).await?;
        module.attribute(attribute).ok_or_else(|| {
            Error::not_found(attribute.as_str(), format!("module '{name}' has no such attribute"))
        })
    }
}

#[linkme::distributed_slice(BACKENDS)]
static MODULES_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_MODULES,
    description: "Attributes of deferred modules by full module path",
    factory: |_config| Ok(Box::new(ModuleBackend::modules(DeferredModuleLoader::shared()))),
};

#[linkme::distributed_slice(BACKENDS)]
static SERVICES_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_SERVICES,
    description: "Attributes of deferred modules under services",
    factory: |_config| {
        Ok(Box::new(ModuleBackend::prefixed(
            NS_SERVICES,
            DeferredModuleLoader::shared(),
        )))
    },
};

#[linkme::distributed_slice(BACKENDS)]
static UTILS_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_UTILS,
    description: "Attributes of deferred modules under utils",
    factory: |_config| {
        Ok(Box::new(ModuleBackend::prefixed(
            NS_UTILS,
            DeferredModuleLoader::shared(),
        )))
    },
};
