//! Request context backend
//!
//! The HTTP layer enters a request scope with [`scope`]; inside it,
//! `request.<section>.<key>` reads from the active [`RequestContext`].
//! Sections are `form`, `headers`, `json` (alias `get_json`) and `args`.
//! Outside a scope every lookup fails with no active context.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use capreg_application::ports::registry::{BACKENDS, BackendEntry};
use capreg_domain::constants::NS_REQUEST;
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::{RequestContext, Value};

use crate::constants::{
    REQUEST_ARGS, REQUEST_FORM, REQUEST_HEADERS, REQUEST_JSON, REQUEST_JSON_ALIAS,
};
use crate::utils::walk;

// Task-local rather than thread-local: the runtime may move a request's
// task between worker threads at await points.
tokio::task_local! {
    static CURRENT_REQUEST: Arc<RequestContext>;
}

/// Run `future` with `context` as the active request
pub async fn scope<F>(context: RequestContext, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_REQUEST.scope(Arc::new(context), future).await
}

/// The active request context, if called inside [`scope`]
pub fn current() -> Option<Arc<RequestContext>> {
    CURRENT_REQUEST.try_with(Arc::clone).ok()
}

/// Backend serving the `request` namespace
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestContextAccessor;

impl RequestContextAccessor {
    /// Create a request context accessor
    pub fn new() -> Self {
        Self
    }
}

fn string_map(entries: &std::collections::HashMap<String, String>) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect(),
    )
}

fn flat_lookup(found: Option<&str>, rest: &[String], lookup: &Lookup<'_>) -> Result<Value> {
    if let Some(extra) = rest.get(1) {
        return Err(Error::invalid_argument(
            extra.as_str(),
            "form fields, headers and query arguments are flat",
        ));
    }
    Ok(found
        .map(|value| Value::String(value.to_string()))
        .unwrap_or_else(|| lookup.default_value()))
}

#[async_trait]
impl CapabilityBackend for RequestContextAccessor {
    fn namespace(&self) -> &str {
        NS_REQUEST
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        let context = current().ok_or_else(|| Error::no_active_context("no request in scope"))?;

        let Some((section, rest)) = lookup.segments.split_first() else {
            return Err(Error::invalid_argument("", "expected a request section"));
        };
        let key = rest.first().map(String::as_str);

        match section.as_str() {
            REQUEST_FORM => match key {
                None => Ok(string_map(context.form_fields())),
                Some(key) => flat_lookup(context.form(key), rest, &lookup),
            },
            REQUEST_HEADERS => match key {
                None => Ok(string_map(context.headers())),
                Some(key) => flat_lookup(context.header(key), rest, &lookup),
            },
            REQUEST_ARGS => match key {
                None => Ok(string_map(context.args())),
                Some(key) => flat_lookup(context.arg(key), rest, &lookup),
            },
            REQUEST_JSON | REQUEST_JSON_ALIAS => {
                let Some(body) = context.json() else {
                    return Ok(lookup.default_value());
                };
                Ok(walk(body, rest)
                    .map(Value::clone)
                    .unwrap_or_else(|_| lookup.default_value()))
            }
            other => Err(Error::not_found(
                other,
                "unknown request section (form, headers, json, args)",
            )),
        }
    }
}

#[linkme::distributed_slice(BACKENDS)]
static REQUEST_BACKEND: BackendEntry = BackendEntry {
    namespace: NS_REQUEST,
    description: "Form, headers, JSON body and query args of the active request",
    factory: |_config| Ok(Box::new(RequestContextAccessor::new())),
};
