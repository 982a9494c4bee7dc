//! Request context snapshot
//!
//! The HTTP framework supplying requests is an external collaborator; it
//! hands the registry one of these per request. Only key lookup with a
//! default is required of each section.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Value;

/// The four request sections exposed under the `request` namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    form: HashMap<String, String>,
    /// Keys stored lowercased; header names are case-insensitive
    headers: HashMap<String, String>,
    json: Option<Value>,
    args: HashMap<String, String>,
}

impl RequestContext {
    /// Create an empty request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a form field
    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the parsed JSON body
    pub fn with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Add a query argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Form field lookup
    pub fn form(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Query argument lookup
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    /// Parsed JSON body, if the request carried one
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// All form fields
    pub fn form_fields(&self) -> &HashMap<String, String> {
        &self.form
    }

    /// All headers, names lowercased
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// All query arguments
    pub fn args(&self) -> &HashMap<String, String> {
        &self.args
    }
}
