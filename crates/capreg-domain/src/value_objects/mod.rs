//! Value objects
//!
//! Immutable data carried between the router, the registry and backends.

pub mod path;
pub mod request;

pub use path::NamespacePath;
pub use request::RequestContext;

/// Resolved value returned by every backend
///
/// JSON-shaped so that configuration trees, stored values, model records and
/// HTTP responses share one representation.
pub type Value = serde_json::Value;
