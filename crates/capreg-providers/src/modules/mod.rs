//! Deferred module loading
//!
//! Modules are named units of attributes registered in
//! `capreg_application::ports::registry::MODULES` (or injected through a
//! [`ModuleCatalog`]). The [`DeferredModuleLoader`] loads each one on first
//! use and caches the handle; [`ModuleBackend`] exposes the loader under the
//! `modules`, `services` and `utils` namespaces.

mod backend;
mod loader;
mod runtime;

pub use backend::ModuleBackend;
pub use loader::{DeferredModuleLoader, ModuleCatalog, ModuleLoaderFn, StaticModule};
pub use runtime::RUNTIME_MODULE;
