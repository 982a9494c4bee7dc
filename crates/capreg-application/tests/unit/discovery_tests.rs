//! Tests for linkme-based backend and module discovery
//!
//! Registers a backend and a module from this test binary to exercise the
//! distributed slices without depending on capreg-providers.

use std::sync::Arc;

use async_trait::async_trait;
use capreg_application::ports::registry::{
    BACKENDS, BackendEntry, MODULES, ModuleEntry, find_backend, find_module, list_backends,
    list_modules,
};
use capreg_application::{BackendConfig, BackendRegistry, PathRouter};
use capreg_domain::error::Result;
use capreg_domain::ports::{CapabilityBackend, LoadedModule, Lookup};
use capreg_domain::value_objects::Value;

struct PingBackend;

#[async_trait]
impl CapabilityBackend for PingBackend {
    fn namespace(&self) -> &str {
        "ping"
    }

    async fn resolve(&self, _lookup: Lookup<'_>) -> Result<Value> {
        Ok(Value::from("pong"))
    }
}

#[linkme::distributed_slice(BACKENDS)]
static PING_BACKEND: BackendEntry = BackendEntry {
    namespace: "ping",
    description: "Test backend answering pong",
    factory: |_config| Ok(Box::new(PingBackend)),
};

struct VersionModule;

impl LoadedModule for VersionModule {
    fn name(&self) -> &str {
        "utils.version"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "major").then(|| Value::from(1))
    }
}

#[linkme::distributed_slice(MODULES)]
static VERSION_MODULE: ModuleEntry = ModuleEntry {
    name: "utils.version",
    description: "Test module",
    loader: || Ok(Arc::new(VersionModule)),
};

#[test]
fn test_registered_backend_is_listed() {
    let backends = list_backends();
    assert!(
        backends.iter().any(|(namespace, _)| *namespace == "ping"),
        "ping should be registered. Available: {backends:?}"
    );
    assert!(find_backend("ping").is_some());
    assert!(find_backend("nonexistent_backend_xyz").is_none());
}

#[test]
fn test_registered_module_is_listed() {
    assert!(list_modules().iter().any(|(name, _)| *name == "utils.version"));
    let module = (find_module("utils.version").expect("module entry").loader)().unwrap();
    assert_eq!(module.attribute("major"), Some(Value::from(1)));
}

#[tokio::test]
async fn test_discovered_registry_routes_to_registered_backend() {
    let router = PathRouter::new(BackendRegistry::discover(BackendConfig::new()));

    assert!(router.registry().has_namespace("ping"));
    assert_eq!(router.resolve("ping.anything").await.unwrap(), Value::from("pong"));
}
