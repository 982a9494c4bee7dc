//! Model finder
//!
//! Every lookup opens its own session on the data source and closes it
//! before returning, whatever the outcome.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use capreg_application::BackendConfig;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::NS_MODELS;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup, ModelFilter, ModelSchema, ModelSource};
use capreg_domain::value_objects::Value;
use tracing::debug;

use super::json_source::JsonModelSource;

/// Interpret one path segment as a query filter
///
/// All-digit segments are primary key filters; anything else names a
/// boolean attribute.
pub fn parse_filter(segment: &str) -> Result<ModelFilter> {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        let id = segment.parse::<i64>().map_err(|_| {
            Error::invalid_argument(segment, "primary key does not fit in 64 bits")
        })?;
        Ok(ModelFilter::PrimaryKey(id))
    } else {
        Ok(ModelFilter::Flag(segment.to_string()))
    }
}

/// Backend serving the `models` namespace
pub struct ModelFinder {
    db_url: Option<String>,
    source: Option<Arc<dyn ModelSource>>,
}

impl ModelFinder {
    /// Finder loading its data source from `db_url` at initialization
    ///
    /// Without a URL every lookup resolves to `null`.
    pub fn from_url(db_url: Option<String>) -> Self {
        Self {
            db_url,
            source: None,
        }
    }

    /// Finder over an already constructed data source
    pub fn with_source(source: Arc<dyn ModelSource>) -> Self {
        Self {
            db_url: None,
            source: Some(source),
        }
    }

    fn build_query(schema: &ModelSchema, segments: &[String]) -> Result<Vec<ModelFilter>> {
        segments
            .iter()
            .map(|segment| {
                let filter = parse_filter(segment)?;
                if let ModelFilter::Flag(field) = &filter {
                    if !schema.has_field(field) {
                        return Err(Error::not_found(
                            segment.as_str(),
                            format!("model '{}' has no such field", schema.name),
                        ));
                    }
                }
                Ok(filter)
            })
            .collect()
    }
}

impl fmt::Debug for ModelFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelFinder")
            .field("db_url", &self.db_url)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

#[async_trait]
impl CapabilityBackend for ModelFinder {
    fn namespace(&self) -> &str {
        NS_MODELS
    }

    async fn initialize(&mut self) -> Result<()> {
        if self.source.is_none() {
            if let Some(url) = &self.db_url {
                let source = JsonModelSource::open(url).await?;
                self.source = Some(Arc::new(source));
            }
        }
        Ok(())
    }

    fn setting(&self, key: &str) -> Option<String> {
        match key {
            capreg_domain::constants::SETTING_DB_URL => self.db_url.clone(),
            _ => None,
        }
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let Some((model_name, filter_segments)) = lookup.segments.split_first() else {
            return Err(Error::invalid_argument("", "expected a model name"));
        };
        let Some(source) = &self.source else {
            debug!(model = %model_name, "No model data source configured");
            return Ok(Value::Null);
        };

        let mut session = source.open_session()?;
        let outcome = match source.model(model_name) {
            None => Err(Error::not_found(model_name.as_str(), "unknown model type")),
            Some(schema) => match Self::build_query(&schema, filter_segments) {
                Ok(filters) => session.first(&schema, &filters).await,
                Err(err) => Err(err),
            },
        };
        session.close().await;

        Ok(outcome?.unwrap_or(Value::Null))
    }
}

#[linkme::distributed_slice(BACKENDS)]
static MODELS_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_MODELS,
    description: "First model record matching primary-key and flag filters",
    factory: |config: &BackendConfig| {
        Ok(Box::new(ModelFinder::from_url(
            config.db_url().map(ToString::to_string),
        )))
    },
};
