//! JSON fixture model source
//!
//! A small ORM stand-in reading every model from one JSON document:
//!
//! ```json
//! {
//!   "user": {
//!     "primary_key": "id",
//!     "fields": ["id", "name", "active"],
//!     "records": [{"id": 42, "name": "ada", "active": true}]
//!   }
//! }
//! ```
//!
//! `primary_key` defaults to `id`; `fields` defaults to every key seen in
//! `records`. The `db_url` may be a plain path or `json://<path>`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{ModelFilter, ModelSchema, ModelSession, ModelSource};
use capreg_domain::value_objects::Value;
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::{DEFAULT_PRIMARY_KEY, JSON_MODEL_SCHEME};

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    primary_key: Option<String>,
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    records: Vec<Value>,
}

#[derive(Debug)]
struct Table {
    schema: ModelSchema,
    records: Vec<Value>,
}

#[derive(Debug, Default)]
struct SessionStats {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Model source backed by an in-memory copy of a JSON document
#[derive(Debug, Clone)]
pub struct JsonModelSource {
    tables: Arc<HashMap<String, Table>>,
    stats: Arc<SessionStats>,
}

impl JsonModelSource {
    /// Load the document named by `db_url`
    pub async fn open(db_url: &str) -> Result<Self> {
        let path = Path::new(db_url.strip_prefix(JSON_MODEL_SCHEME).unwrap_or(db_url));
        let raw = tokio::fs::read_to_string(path).await.map_err(|err| {
            Error::database_with_source(
                format!("Failed to open model data source {}", path.display()),
                err,
            )
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|err| {
            Error::database_with_source(
                format!("Invalid model data source {}", path.display()),
                err,
            )
        })?;
        let source = Self::from_value(document)?;
        info!(path = %path.display(), models = source.tables.len(), "Model data source loaded");
        Ok(source)
    }

    /// Build a source from an already parsed document
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(models) = document else {
            return Err(Error::database("model data source must be a JSON object"));
        };

        let mut tables = HashMap::with_capacity(models.len());
        for (name, definition) in models {
            let file: TableFile = serde_json::from_value(definition).map_err(|err| {
                Error::database_with_source(format!("Invalid definition of model '{name}'"), err)
            })?;
            let fields = if file.fields.is_empty() {
                file.records
                    .iter()
                    .filter_map(Value::as_object)
                    .flat_map(|record| record.keys().cloned())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            } else {
                file.fields
            };
            let schema = ModelSchema {
                name: name.clone(),
                primary_key: file
                    .primary_key
                    .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string()),
                fields,
            };
            tables.insert(
                name,
                Table {
                    schema,
                    records: file.records,
                },
            );
        }

        Ok(Self {
            tables: Arc::new(tables),
            stats: Arc::new(SessionStats::default()),
        })
    }

    /// Sessions opened and not yet closed
    pub fn open_sessions(&self) -> usize {
        self.stats
            .opened
            .load(Ordering::SeqCst)
            .saturating_sub(self.stats.closed.load(Ordering::SeqCst))
    }

    /// Sessions opened so far
    pub fn sessions_opened(&self) -> usize {
        self.stats.opened.load(Ordering::SeqCst)
    }
}

impl ModelSource for JsonModelSource {
    fn model(&self, name: &str) -> Option<ModelSchema> {
        self.tables.get(name).map(|table| table.schema.clone())
    }

    fn open_session(&self) -> Result<Box<dyn ModelSession>> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(JsonSession {
            tables: Arc::clone(&self.tables),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct JsonSession {
    tables: Arc<HashMap<String, Table>>,
    stats: Arc<SessionStats>,
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn primary_key_matches(value: Option<&Value>, id: i64) -> bool {
    match value {
        Some(Value::Number(number)) => number.as_i64() == Some(id),
        Some(Value::String(text)) => text.parse::<i64>().ok() == Some(id),
        _ => false,
    }
}

fn matches(record: &Value, schema: &ModelSchema, filters: &[ModelFilter]) -> bool {
    filters.iter().all(|filter| match filter {
        ModelFilter::PrimaryKey(id) => primary_key_matches(record.get(&schema.primary_key), *id),
        ModelFilter::Flag(field) => record.get(field).is_some_and(truthy),
    })
}

#[async_trait]
impl ModelSession for JsonSession {
    async fn first(
        &mut self,
        schema: &ModelSchema,
        filters: &[ModelFilter],
    ) -> Result<Option<Value>> {
        let table = self
            .tables
            .get(&schema.name)
            .ok_or_else(|| Error::database(format!("no table for model '{}'", schema.name)))?;
        debug!(model = %schema.name, filters = filters.len(), "Querying model");
        Ok(table
            .records
            .iter()
            .find(|record| matches(record, schema, filters))
            .cloned())
    }

    async fn close(self: Box<Self>) {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
    }
}
