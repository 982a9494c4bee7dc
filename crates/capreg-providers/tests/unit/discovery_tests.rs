//! Every provider registers itself through linkme

use capreg_application::ports::registry::{find_backend, list_backends, list_modules};
use capreg_application::{BackendConfig, BackendRegistry};
use capreg_domain::constants::{
    NS_API, NS_BITWISE, NS_CONFIG, NS_ENV, NS_MODELS, NS_MODULES, NS_REQUEST, NS_SERVICES,
    NS_STORAGE, NS_UTILS,
};
use capreg_providers::modules::RUNTIME_MODULE;

const ALL: [&str; 10] = [
    NS_API, NS_BITWISE, NS_CONFIG, NS_ENV, NS_MODELS, NS_MODULES, NS_REQUEST, NS_SERVICES,
    NS_STORAGE, NS_UTILS,
];

#[test]
fn test_all_backends_listed() {
    let listed: Vec<&str> = list_backends().into_iter().map(|(ns, _)| ns).collect();
    for namespace in ALL {
        assert!(listed.contains(&namespace), "{namespace} not registered");
        assert!(find_backend(namespace).is_some());
    }
}

#[test]
fn test_discovered_registry_serves_every_namespace() {
    let registry = BackendRegistry::discover(BackendConfig::new());
    let mut expected: Vec<String> = ALL.iter().map(ToString::to_string).collect();
    expected.sort_unstable();

    assert_eq!(registry.namespaces(), expected);
    assert!(ALL.iter().all(|ns| !registry.is_constructed(ns)));
}

#[test]
fn test_runtime_module_listed() {
    assert!(
        list_modules()
            .iter()
            .any(|(name, _)| *name == RUNTIME_MODULE)
    );
}
