//! # capreg
//!
//! A process-wide capability registry. One entry point resolves a dotted
//! path such as `config.database.host`, `storage.session_id` or
//! `models.user.42` to a value produced by the backend serving the first
//! segment. Backends are discovered at link time, constructed on first use
//! and shared for the rest of the process.
//!
//! ## Example
//!
//! ```ignore
//! let router = capreg::global()?;
//! let host = router.resolve("config.database.host").await?;
//! let key = router.resolve_or("env.API_KEY", serde_json::json!("dev")).await?;
//! router.assign("storage.last_host", host).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error taxonomy, path parsing, backend port
//! - `application` - discovery slices, backend registry, path router
//! - `providers` - the concrete backends
//! - `infrastructure` - configuration, logging, the process-wide router

/// Domain layer - error taxonomy, path parsing and ports
pub mod domain {
    pub use capreg_domain::*;
}

/// Application layer - registry and router
pub mod application {
    pub use capreg_application::*;
}

/// Concrete capability backends
pub mod providers {
    pub use capreg_providers::*;
}

/// Infrastructure layer - configuration, logging and the process-wide router
pub mod infrastructure {
    pub use capreg_infrastructure::*;
}

pub use application::{BackendConfig, BackendRegistry, PathRouter};
pub use domain::{Error, LookupError, Value};
pub use infrastructure::{RegistryConfig, global, install, reset};
pub use providers::request::scope as request_scope;
