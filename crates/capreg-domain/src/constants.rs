//! Domain constants
//!
//! Namespace tokens served by the built-in backends, the setting keys
//! understood by `BackendConfig`, and their defaults.

// ============================================================================
// PATH CONSTANTS
// ============================================================================

/// Separator between dotted path segments
pub const PATH_SEPARATOR: char = '.';

/// Namespace tokens starting with this marker are internal and never routed
pub const DEFAULT_RESERVED_PREFIX: &str = "_";

// ============================================================================
// NAMESPACE TOKENS
// ============================================================================

/// JSON configuration snapshot
pub const NS_CONFIG: &str = "config";

/// Process environment variables
pub const NS_ENV: &str = "env";

/// Active request scope (form, headers, json body, query args)
pub const NS_REQUEST: &str = "request";

/// Model finder over the configured data source
pub const NS_MODELS: &str = "models";

/// Generic deferred module loader
pub const NS_MODULES: &str = "modules";

/// Service modules
pub const NS_SERVICES: &str = "services";

/// Utility modules
pub const NS_UTILS: &str = "utils";

/// Persistent key-value store
pub const NS_STORAGE: &str = "storage";

/// Bit-flag helper
pub const NS_BITWISE: &str = "bitwise";

/// HTTP client against the configured API base URL
pub const NS_API: &str = "api";

// ============================================================================
// SETTING KEYS
// ============================================================================

/// Configuration snapshot file name
pub const SETTING_CONFIG_FILE: &str = "config_file";

/// Persistent store file name
pub const SETTING_STORAGE_FILE: &str = "storage_file";

/// Model data source location
pub const SETTING_DB_URL: &str = "db_url";

/// Base URL for the HTTP client backend
pub const SETTING_API_BASE_URL: &str = "api_base_url";

/// Request timeout for the HTTP client backend, in seconds
pub const SETTING_API_TIMEOUT_SECS: &str = "api_timeout_secs";

/// Reserved namespace marker
pub const SETTING_RESERVED_PREFIX: &str = "reserved_prefix";

// ============================================================================
// DEFAULTS
// ============================================================================

/// Default configuration snapshot file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default persistent store file, relative to the working directory
pub const DEFAULT_STORAGE_FILE: &str = "data_storage.db";

/// Default HTTP client timeout in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
