//! # capreg domain layer
//!
//! Core types shared by every other crate of the capability registry:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Backend error enum and the caller-facing [`LookupError`] taxonomy |
//! | [`value_objects`] | Dotted [`NamespacePath`], request context snapshot, resolved [`Value`] |
//! | [`ports`] | [`CapabilityBackend`] plus the narrow collaborator interfaces backends depend on |
//! | [`constants`] | Namespace tokens, setting keys and defaults |
//!
//! This crate has no runtime dependencies beyond serde and thiserror; it never
//! performs I/O.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, LookupError, Result};
pub use ports::{CapabilityBackend, Lookup};
pub use value_objects::{NamespacePath, RequestContext, Value};
