//! Error handling types
//!
//! Two layers of errors exist:
//!
//! - [`Error`] is what a backend reports from inside its own resolution logic.
//! - [`LookupError`] is what callers of the router receive. Every backend
//!   [`Error`] is converted exactly once, by [`LookupError::from_backend`],
//!   which attaches the namespace and the first unresolved segment.

use thiserror::Error;

/// Result type alias for backend operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by capability backends and their collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// A path segment did not name anything in the backend
    #[error("'{segment}' not found: {message}")]
    NotFound {
        /// The segment that could not be resolved
        segment: String,
        /// What was being looked up
        message: String,
    },

    /// A path segment was present but unusable (bad arity, unparsable number)
    #[error("invalid segment '{segment}': {message}")]
    InvalidArgument {
        /// The offending segment (empty when a segment is missing)
        segment: String,
        /// Description of the problem
        message: String,
    },

    /// A context-dependent backend was used outside its scope
    #[error("no active context: {message}")]
    NoActiveContext {
        /// Which context was expected
        message: String,
    },

    /// The backend does not accept assignment
    #[error("backend does not accept assignment")]
    ReadOnly,

    /// A deferred module failed to load
    #[error("module '{module}' failed to load: {message}")]
    Module {
        /// Dotted module name
        module: String,
        /// Description of the load failure
        message: String,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Data source error raised by the model finder's collaborator
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Path-level error creation methods
impl Error {
    /// Create a not found error for a segment
    pub fn not_found<S: Into<String>, M: Into<String>>(segment: S, message: M) -> Self {
        Self::NotFound {
            segment: segment.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error for a segment
    pub fn invalid_argument<S: Into<String>, M: Into<String>>(segment: S, message: M) -> Self {
        Self::InvalidArgument {
            segment: segment.into(),
            message: message.into(),
        }
    }

    /// Create a missing-context error
    pub fn no_active_context<S: Into<String>>(message: S) -> Self {
        Self::NoActiveContext {
            message: message.into(),
        }
    }

    /// Create a module load error
    pub fn module<N: Into<String>, M: Into<String>>(module: N, message: M) -> Self {
        Self::Module {
            module: module.into(),
            message: message.into(),
        }
    }

    /// The path segment this error points at, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::NotFound { segment, .. } | Self::InvalidArgument { segment, .. }
                if !segment.is_empty() =>
            {
                Some(segment.as_str())
            }
            _ => None,
        }
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network and database error creation methods
impl Error {
    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a database error with source
    pub fn database_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Failure returned to callers of the path router
///
/// Each variant identifies which taxonomy case fired; namespace-bound
/// variants carry the namespace token so the caller can tell which backend
/// was involved.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The first segment is internally reserved (or the path is empty)
    #[error("'{token}' is a reserved name")]
    Reserved {
        /// The rejected namespace token
        token: String,
    },

    /// The path contains an empty segment
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The path as supplied by the caller
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// No backend implementation serves this namespace
    #[error("no backend registered for namespace '{namespace}'")]
    UnknownNamespace {
        /// The unknown namespace token
        namespace: String,
    },

    /// A context-dependent backend was invoked outside its scope
    #[error("namespace '{namespace}' requires an active context")]
    NoActiveContext {
        /// The namespace whose context was missing
        namespace: String,
    },

    /// Assignment against a backend that is not writable
    #[error("namespace '{namespace}' is read-only")]
    ReadOnlyNamespace {
        /// The namespace that rejected the write
        namespace: String,
    },

    /// Any failure inside a backend's own logic, including initialization
    #[error("backend '{namespace}' failed{}: {source}", describe_segment(.segment))]
    BackendFailure {
        /// The namespace whose backend failed
        namespace: String,
        /// First unresolved segment, when the failure concerns one
        segment: Option<String>,
        /// The backend's own error
        #[source]
        source: Box<Error>,
    },
}

fn describe_segment(segment: &Option<String>) -> String {
    match segment {
        Some(segment) => format!(" at segment '{segment}'"),
        None => String::new(),
    }
}

impl LookupError {
    /// Convert a backend error into the caller-facing taxonomy
    ///
    /// `fallback_segment` is used when the backend error does not point at a
    /// segment itself; routers pass the first remaining segment.
    pub fn from_backend(namespace: &str, error: Error, fallback_segment: Option<&str>) -> Self {
        match error {
            Error::NoActiveContext { .. } => Self::NoActiveContext {
                namespace: namespace.to_string(),
            },
            Error::ReadOnly => Self::ReadOnlyNamespace {
                namespace: namespace.to_string(),
            },
            other => Self::BackendFailure {
                namespace: namespace.to_string(),
                segment: other
                    .segment()
                    .or(fallback_segment)
                    .map(ToString::to_string),
                source: Box::new(other),
            },
        }
    }

    /// Fill in the segment of a backend failure that has none yet
    pub fn or_segment(self, fallback: Option<&str>) -> Self {
        match self {
            Self::BackendFailure {
                namespace,
                segment: None,
                source,
            } => Self::BackendFailure {
                namespace,
                segment: fallback.map(ToString::to_string),
                source,
            },
            other => other,
        }
    }

    /// The namespace involved, if the failure got as far as choosing one
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::UnknownNamespace { namespace }
            | Self::NoActiveContext { namespace }
            | Self::ReadOnlyNamespace { namespace }
            | Self::BackendFailure { namespace, .. } => Some(namespace.as_str()),
            Self::Reserved { .. } | Self::InvalidPath { .. } => None,
        }
    }

    /// The unresolved segment of a backend failure
    pub fn segment(&self) -> Option<&str> {
        match self {
            Self::BackendFailure { segment, .. } => segment.as_deref(),
            _ => None,
        }
    }
}
