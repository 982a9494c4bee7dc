//! # Infrastructure Layer
//!
//! Cross-cutting concerns around the router: where configuration comes
//! from, how logs are emitted, and the one router instance shared by the
//! whole process.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment-based loader for [`RegistryConfig`] |
//! | [`logging`] | tracing-subscriber setup |
//! | [`error_ext`] | context helpers converting foreign errors |
//! | [`global`] | process-wide [`PathRouter`](capreg_application::PathRouter) |
//! | [`constants`] | file names and environment variable names |

// Force linkme registration of every provider backend
extern crate capreg_providers;

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod global;
pub mod logging;

pub use config::{ConfigLoader, LoggingConfig, RegistryConfig};
pub use error_ext::ErrorContext;
pub use global::{build_router, global, install, reset};
