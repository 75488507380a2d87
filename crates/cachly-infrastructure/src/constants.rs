//! Infrastructure layer constants
//!
//! Configuration defaults. Naming rules that end up in cache ids are defined
//! in `cachly_domain::constants`; backend defaults in
//! `cachly_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cachly.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cachly";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "CACHLY";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Name of the backend used when the caller does not pick one
pub const DEFAULT_BACKEND_NAME: &str = "memory";

/// Name of the always-configured backend that stores nothing
pub const NULL_BACKEND_NAME: &str = "null";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "CACHLY_LOG";

/// File name stem for rolling log files when the configured path has none
pub const LOG_FILE_DEFAULT_STEM: &str = "cachly";
