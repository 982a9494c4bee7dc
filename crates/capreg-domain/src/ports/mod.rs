//! Port definitions
//!
//! [`CapabilityBackend`] is the only contract the router knows. The other
//! traits are the narrow interfaces individual backends need from their
//! external collaborators (an ORM-like data source, loadable modules).

pub mod backend;
pub mod models;
pub mod modules;

pub use backend::{CapabilityBackend, Lookup};
pub use models::{ModelFilter, ModelSchema, ModelSession, ModelSource};
pub use modules::LoadedModule;
