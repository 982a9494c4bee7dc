//! Provider constants

/// tracing target used by the Logger capability
pub const LOG_TARGET: &str = "capreg::log";

/// Request section holding form fields
pub const REQUEST_FORM: &str = "form";

/// Request section holding headers
pub const REQUEST_HEADERS: &str = "headers";

/// Request section holding the parsed JSON body
pub const REQUEST_JSON: &str = "json";

/// Alias of [`REQUEST_JSON`] kept for paths written against `get_json`
pub const REQUEST_JSON_ALIAS: &str = "get_json";

/// Request section holding query arguments
pub const REQUEST_ARGS: &str = "args";

/// Primary key field assumed when a model fixture does not name one
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// URL scheme prefix accepted for JSON model fixtures
pub const JSON_MODEL_SCHEME: &str = "json://";

/// User agent sent by the HTTP client backend
pub const HTTP_USER_AGENT: &str = concat!("capreg/", env!("CARGO_PKG_VERSION"));
