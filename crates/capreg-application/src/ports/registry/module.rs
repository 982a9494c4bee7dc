//! Loadable Module Registry
//!
//! Units reachable through the `modules`, `services` and `utils`
//! namespaces. Loading is deferred until the first lookup; the loader
//! caches the result.

use std::sync::Arc;

use capreg_domain::error::Result;
use capreg_domain::ports::LoadedModule;

/// Registry entry for a loadable module
pub struct ModuleEntry {
    /// Dotted module name (e.g. "services.billing")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Loader run on first use
    pub loader: fn() -> Result<Arc<dyn LoadedModule>>,
}

#[linkme::distributed_slice]
pub static MODULES: [ModuleEntry] = [..];

/// Find the registered module named `name`
pub fn find_module(name: &str) -> Option<&'static ModuleEntry> {
    MODULES.iter().find(|entry| entry.name == name)
}

/// List all registered modules as (name, description), sorted
pub fn list_modules() -> Vec<(&'static str, &'static str)> {
    let mut modules: Vec<_> = MODULES
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect();
    modules.sort_unstable();
    modules
}
