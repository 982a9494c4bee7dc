//! Backend Registration System
//!
//! Compile-time registration of capability backends and loadable modules
//! using `linkme` distributed slices.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Backend Registration Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(BACKENDS)]   │
//! │                        static ENTRY: BackendEntry = ...         │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static BACKENDS: [Entry] = [..]      │
//! │                              ↓                                  │
//! │  3. BackendRegistry::discover() copies the factories            │
//! │                              ↓                                  │
//! │  4. First touch of "config" runs the factory + initialize()     │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a Backend (in capreg-providers)
//!
//! ```ignore
//! use capreg_application::ports::registry::{BackendEntry, BACKENDS};
//!
//! #[linkme::distributed_slice(BACKENDS)]
//! static ENV_BACKEND: BackendEntry = BackendEntry {
//!     namespace: "env",
//!     description: "Process environment variables",
//!     factory: |_config| Ok(Box::new(EnvAccessor::new())),
//! };
//! ```

pub mod backend;
pub mod module;

pub use backend::{BACKENDS, BackendEntry, find_backend, list_backends};
pub use module::{MODULES, ModuleEntry, find_module, list_modules};
