//! Capability backend port
//!
//! Every pluggable service behind a namespace implements this trait. The
//! registry constructs a backend, calls [`CapabilityBackend::initialize`]
//! once while it still owns it exclusively, then shares it for the rest of
//! the process.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Value;

/// One resolution request handed to a backend
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    /// Segments after the namespace token
    pub segments: &'a [String],
    /// Caller-supplied default for backends with default-on-absence semantics
    pub default: Option<&'a Value>,
}

impl<'a> Lookup<'a> {
    /// A lookup without a caller default
    pub fn new(segments: &'a [String]) -> Self {
        Self {
            segments,
            default: None,
        }
    }

    /// Attach a caller default
    pub fn with_default(mut self, default: &'a Value) -> Self {
        self.default = Some(default);
        self
    }

    /// First segment, if any
    pub fn first(&self) -> Option<&'a str> {
        self.segments.first().map(String::as_str)
    }

    /// The caller default, or `null` when none was supplied
    pub fn default_value(&self) -> Value {
        self.default.cloned().unwrap_or(Value::Null)
    }

    /// Require exactly one segment, returning it
    pub fn single(&self, what: &str) -> Result<&'a str> {
        match self.segments {
            [only] => Ok(only.as_str()),
            [] => Err(Error::invalid_argument("", format!("expected {what}"))),
            [_, extra, ..] => Err(Error::invalid_argument(
                extra.as_str(),
                format!("expected only {what}"),
            )),
        }
    }
}

/// A pluggable service resolving the remainder of a dotted path
#[async_trait]
pub trait CapabilityBackend: Send + Sync {
    /// The namespace token this backend serves
    fn namespace(&self) -> &str;

    /// One-time setup, run right after construction
    ///
    /// A failure discards the instance; the next request constructs a new one.
    async fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Backend-specific setting lookup
    fn setting(&self, _key: &str) -> Option<String> {
        None
    }

    /// Resolve the remaining segments against this backend
    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value>;

    /// Whether [`CapabilityBackend::assign`] is supported
    fn writable(&self) -> bool {
        false
    }

    /// Store `value` under the remaining segments
    async fn assign(&self, _segments: &[String], _value: Value) -> Result<()> {
        Err(Error::ReadOnly)
    }
}
