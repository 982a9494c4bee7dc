//! Registry configuration
//!
//! [`RegistryConfig`] is what the process is configured with; the
//! application layer only ever sees its flattened
//! [`BackendConfig`](capreg_application::BackendConfig) form.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{LoggingConfig, RegistryConfig};
