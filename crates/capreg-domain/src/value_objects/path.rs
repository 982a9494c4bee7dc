//! Dotted namespace paths
//!
//! A path such as `config.database.host` is split on `.` into a namespace
//! token (`config`) and the resolution path handed to the backend
//! (`["database", "host"]`).

use std::fmt;

use crate::constants::PATH_SEPARATOR;
use crate::error::LookupError;

/// A parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath {
    namespace: String,
    segments: Vec<String>,
}

impl NamespacePath {
    /// Parse a dotted path, rejecting reserved namespace tokens
    ///
    /// An empty path, or one whose namespace token starts with
    /// `reserved_prefix`, is [`LookupError::Reserved`]. Empty segments
    /// anywhere else (`config..host`, `env.`) are [`LookupError::InvalidPath`].
    pub fn parse(path: &str, reserved_prefix: &str) -> Result<Self, LookupError> {
        if path.is_empty() {
            return Err(LookupError::Reserved {
                token: String::new(),
            });
        }

        let mut parts = path.split(PATH_SEPARATOR);
        let namespace = parts.next().unwrap_or_default();
        if !reserved_prefix.is_empty() && namespace.starts_with(reserved_prefix) {
            return Err(LookupError::Reserved {
                token: namespace.to_string(),
            });
        }
        if namespace.is_empty() {
            return Err(LookupError::InvalidPath {
                path: path.to_string(),
                reason: "empty namespace token".to_string(),
            });
        }

        let segments: Vec<String> = parts.map(ToString::to_string).collect();
        if let Some(position) = segments.iter().position(String::is_empty) {
            return Err(LookupError::InvalidPath {
                path: path.to_string(),
                reason: format!("empty segment at position {}", position + 1),
            });
        }

        Ok(Self {
            namespace: namespace.to_string(),
            segments,
        })
    }

    /// The namespace token selecting the backend
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The resolution path handed to the backend
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment after the namespace, if any
    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.namespace)?;
        for segment in &self.segments {
            write!(f, "{PATH_SEPARATOR}{segment}")?;
        }
        Ok(())
    }
}
