//! Capability Backend Registry
//!
//! Backends register themselves via `linkme::distributed_slice(BACKENDS)`
//! and are discovered at runtime by iterating the slice.

use capreg_domain::error::Result;
use capreg_domain::ports::CapabilityBackend;

use crate::config::BackendConfig;

/// Registry entry for capability backends
///
/// The factory only constructs; the registry calls
/// [`CapabilityBackend::initialize`] on the result before sharing it.
pub struct BackendEntry {
    /// Namespace token served (e.g. "config", "storage")
    pub namespace: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating an uninitialized backend
    pub factory: fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>>,
}

#[linkme::distributed_slice]
pub static BACKENDS: [BackendEntry] = [..];

/// Find the registered entry serving `namespace`
///
/// When two entries claim the same namespace the first one in link order
/// wins.
pub fn find_backend(namespace: &str) -> Option<&'static BackendEntry> {
    BACKENDS.iter().find(|entry| entry.namespace == namespace)
}

/// List all registered backends as (namespace, description), sorted
pub fn list_backends() -> Vec<(&'static str, &'static str)> {
    let mut backends: Vec<_> = BACKENDS
        .iter()
        .map(|entry| (entry.namespace, entry.description))
        .collect();
    backends.sort_unstable();
    backends.dedup_by_key(|(namespace, _)| *namespace);
    backends
}
