//! Model data source port
//!
//! The ORM-like layer behind the `models` namespace. The model finder only
//! needs to resolve a model name to a queryable schema, open a session,
//! fetch the first record matching a conjunction of filters, and release
//! the session afterwards.

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Value;

/// A queryable model type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    /// Model name as used in paths
    pub name: String,
    /// Field compared against numeric path segments
    pub primary_key: String,
    /// Every field a filter may reference
    pub fields: Vec<String>,
}

impl ModelSchema {
    /// Whether `field` exists on this model
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// One equality filter on a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFilter {
    /// Primary key equals the given id
    PrimaryKey(i64),
    /// The named attribute is truthy
    Flag(String),
}

/// Resolves model names and hands out query sessions
pub trait ModelSource: Send + Sync {
    /// Look up a model type by name
    fn model(&self, name: &str) -> Option<ModelSchema>;

    /// Open a fresh query session
    fn open_session(&self) -> Result<Box<dyn ModelSession>>;
}

/// A single query session; must be closed after use
#[async_trait]
pub trait ModelSession: Send {
    /// First record of `schema` matching every filter
    async fn first(&mut self, schema: &ModelSchema, filters: &[ModelFilter])
    -> Result<Option<Value>>;

    /// Release the session
    async fn close(self: Box<Self>);
}
