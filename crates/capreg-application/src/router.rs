//! Path Router
//!
//! The single entry point callers use: a dotted path in, a typed result
//! out. The router parses the path, asks the [`BackendRegistry`] for the
//! namespace's backend and delegates the remaining segments to it. It
//! caches nothing itself and never masks a backend failure.

use capreg_domain::error::LookupError;
use capreg_domain::ports::Lookup;
use capreg_domain::value_objects::{NamespacePath, Value};
use tracing::{debug, instrument};

use crate::registry::{BackendRegistry, SharedBackend};

/// Resolves dotted paths through the backend registry
#[derive(Debug)]
pub struct PathRouter {
    registry: BackendRegistry,
    reserved_prefix: String,
}

impl PathRouter {
    /// Create a router over `registry`, reading the reserved prefix from its config
    pub fn new(registry: BackendRegistry) -> Self {
        let reserved_prefix = registry.config().reserved_prefix().to_string();
        Self {
            registry,
            reserved_prefix,
        }
    }

    /// The underlying registry
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Parse `path` with this router's reserved prefix
    pub fn parse(&self, path: &str) -> Result<NamespacePath, LookupError> {
        NamespacePath::parse(path, &self.reserved_prefix)
    }

    /// Resolve a dotted path
    ///
    /// # Errors
    ///
    /// - [`LookupError::Reserved`] for an empty path or a reserved namespace
    /// - [`LookupError::UnknownNamespace`] when no backend serves the namespace
    /// - [`LookupError::NoActiveContext`] from context-bound backends
    /// - [`LookupError::BackendFailure`] for anything the backend rejects
    pub async fn resolve(&self, path: &str) -> Result<Value, LookupError> {
        self.lookup(path, None).await
    }

    /// Resolve a dotted path, passing a default to backends that support one
    ///
    /// Backends with default-on-absence semantics (environment, storage,
    /// configuration keys) return `default` instead of failing when the
    /// final key is missing. Other failures are still reported.
    pub async fn resolve_or(&self, path: &str, default: Value) -> Result<Value, LookupError> {
        self.lookup(path, Some(&default)).await
    }

    #[instrument(level = "debug", skip(self, default))]
    async fn lookup(&self, path: &str, default: Option<&Value>) -> Result<Value, LookupError> {
        let parsed = self.parse(path)?;
        let backend = self.backend_for(&parsed).await?;

        let mut lookup = Lookup::new(parsed.segments());
        if let Some(default) = default {
            lookup = lookup.with_default(default);
        }

        let value = backend.resolve(lookup).await.map_err(|err| {
            LookupError::from_backend(parsed.namespace(), err, parsed.first_segment())
        })?;
        debug!(namespace = parsed.namespace(), "Path resolved");
        Ok(value)
    }

    /// Store `value` at a dotted path
    ///
    /// Only backends declaring themselves writable accept assignment; all
    /// others yield [`LookupError::ReadOnlyNamespace`].
    #[instrument(level = "debug", skip(self, value))]
    pub async fn assign(&self, path: &str, value: Value) -> Result<(), LookupError> {
        let parsed = self.parse(path)?;
        let backend = self.backend_for(&parsed).await?;

        if !backend.writable() {
            return Err(LookupError::ReadOnlyNamespace {
                namespace: parsed.namespace().to_string(),
            });
        }

        backend
            .assign(parsed.segments(), value)
            .await
            .map_err(|err| {
                LookupError::from_backend(parsed.namespace(), err, parsed.first_segment())
            })
    }

    /// Drop the constructed backend for `namespace` so the next use rebuilds it
    pub fn invalidate(&self, namespace: &str) -> bool {
        self.registry.invalidate(namespace)
    }

    async fn backend_for(&self, path: &NamespacePath) -> Result<SharedBackend, LookupError> {
        self.registry
            .get_or_create(path.namespace())
            .await
            .map_err(|err| err.or_segment(path.first_segment()))
    }
}
