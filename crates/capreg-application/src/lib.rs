//! # capreg application layer
//!
//! Orchestrates path resolution on top of the domain ports:
//!
//! ```text
//! caller ─▶ PathRouter::resolve("config.database.host")
//!              │ parse ─▶ namespace = "config", segments = ["database", "host"]
//!              ▼
//!           BackendRegistry::get_or_create("config")   (lazy, exactly once)
//!              ▼
//!           CapabilityBackend::resolve(["database", "host"])
//! ```
//!
//! Backends are discovered through the linkme slices in
//! [`ports::registry`]; concrete implementations live in `capreg-providers`.

pub mod config;
pub mod ports;
pub mod registry;
pub mod router;

pub use config::BackendConfig;
pub use registry::{BackendFactory, BackendRegistry, SharedBackend};
pub use router::PathRouter;
