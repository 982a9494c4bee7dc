//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "capreg.toml";

/// Directory under the user config dir searched for the configuration file
pub const DEFAULT_CONFIG_DIR: &str = "capreg";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CAPREG";

/// Separator between nested keys in prefixed environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Unprefixed variables honoured for compatibility, and the key each sets
pub const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("CONFIG_FILE", "config_file"),
    ("STORAGE_FILE", "storage_file"),
    ("DB_URL", "db_url"),
    ("API_BASE_URL", "api_base_url"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FILE", "logging.file_output"),
];

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CAPREG_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "capreg";
