//! Provider Constants
//!
//! Constants specific to backend implementations. Domain naming rules live in
//! `cachly-domain`; configuration defaults live in `cachly-infrastructure`.

// ============================================================================
// BACKEND NAMES
// ============================================================================

/// Registry name of the moka backend
pub const BACKEND_MOKA: &str = "moka";

/// Registry name of the file backend
pub const BACKEND_FILE: &str = "file";

/// Registry name of the Redis backend
pub const BACKEND_REDIS: &str = "redis";

/// Registry name of the null backend
pub const BACKEND_NULL: &str = "null";

// ============================================================================
// FILE CONSTANTS
// ============================================================================

/// Extension of entry files
pub const FILE_ENTRY_EXTENSION: &str = "cache";

/// Extension of files being written
pub const FILE_TEMP_EXTENSION: &str = "tmp";

/// Directory under the user cache dir used when no path is configured
pub const FILE_DEFAULT_DIR_NAME: &str = "cachly";

/// Probe file written to check the directory is writable
pub const FILE_WRITE_PROBE: &str = ".cachly-write-probe";

// ============================================================================
// REDIS CONSTANTS
// ============================================================================

/// Default Redis connection URI
pub const REDIS_DEFAULT_URI: &str = "redis://localhost:6379";

/// Default prefix of every key this backend writes
pub const REDIS_DEFAULT_KEY_PREFIX: &str = "cachly:";

/// Keys requested per SCAN round trip
pub const REDIS_SCAN_BATCH: usize = 500;
