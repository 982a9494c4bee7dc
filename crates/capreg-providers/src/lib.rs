//! # capreg - Backend Implementations
//!
//! Every concrete capability backend, each registering itself into
//! `capreg_application::ports::registry::BACKENDS` via linkme.
//!
//! ## Backends
//!
//! | Namespace | Backend | Writable |
//! |-----------|---------|----------|
//! | `config` | [`config::ConfigStore`] - JSON snapshot, cached per file name | no |
//! | `env` | [`env::EnvAccessor`] - process environment | no |
//! | `request` | [`request::RequestContextAccessor`] - active request scope | no |
//! | `models` | [`models::ModelFinder`] - first record matching path filters | no |
//! | `modules`, `services`, `utils` | [`modules::ModuleBackend`] - deferred module attributes | no |
//! | `storage` | [`storage::KeyValueStore`] - single-file persistent map | yes |
//! | `bitwise` | [`bitwise::BitwiseBackend`] - pure bit-flag functions | no |
//! | `api` | [`http::ApiClient`] - JSON over HTTP | no |
//!
//! The [`logging::Logger`] capability is invoked directly rather than
//! resolved through a path.
//!
//! ## Usage
//!
//! Linking this crate is enough to make every backend discoverable:
//!
//! ```ignore
//! extern crate capreg_providers;
//!
//! let registry = BackendRegistry::discover(BackendConfig::new());
//! let router = PathRouter::new(registry);
//! let host = router.resolve("config.database.host").await?;
//! ```

pub use capreg_domain::error::{Error, Result};

/// Provider-specific constants
pub mod constants;

/// Bit-flag helper functions and backend
pub mod bitwise;

/// Configuration snapshot backend
pub mod config;

/// Environment variable backend
pub mod env;

/// HTTP client backend
pub mod http;

/// Logger capability
pub mod logging;

/// Model finder backend and the JSON fixture data source
pub mod models;

/// Deferred module loader and its namespace backends
pub mod modules;

/// Request context backend and scope helpers
pub mod request;

/// Persistent key-value backend
pub mod storage;

/// Shared utilities for backend implementations
pub mod utils;
