//! Loadable module port
//!
//! The `modules`, `services` and `utils` namespaces return attributes of
//! named modules that are loaded on first use and cached afterwards.

use crate::value_objects::Value;

/// A loaded module exposing named attributes
pub trait LoadedModule: Send + Sync {
    /// Dotted module name
    fn name(&self) -> &str;

    /// Attribute lookup
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Names of every attribute, for diagnostics
    fn attribute_names(&self) -> Vec<String> {
        Vec::new()
    }
}
