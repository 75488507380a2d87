//! Domain layer constants
//!
//! Naming rules for namespaces, registry slots and compute-once keys. These
//! values end up inside cache ids, so changing any of them orphans data that
//! is already stored.

// ============================================================================
// NAMESPACE CONSTANTS
// ============================================================================

/// Namespace used when the caller does not name one
pub const DEFAULT_NAMESPACE: &str = "cachly-production";

/// Infix joining a parent namespace and a collection name
pub const COLLECTION_NAMESPACE_INFIX: &str = "-collection-";

// ============================================================================
// REGISTRY CONSTANTS
// ============================================================================

/// Registry slot suffix for the item key registry
pub const KEY_REGISTRY_SUFFIX: &str = "keys";

/// Registry slot suffix for the collection registry
pub const COLLECTION_REGISTRY_SUFFIX: &str = "ckeys";

// ============================================================================
// CACHE ID CONSTANTS
// ============================================================================

/// Kind tag hashed into ids of user items and collection handles
pub const CACHE_ID_KIND_ITEM: &str = "item";

/// Kind tag hashed into ids of registry slots
pub const CACHE_ID_KIND_REGISTRY: &str = "registry";

/// Separator between the hashed components of a cache id
pub const CACHE_ID_COMPONENT_SEPARATOR: char = '\0';

// ============================================================================
// COMPUTE-ONCE CONSTANTS
// ============================================================================

/// Separator between packed compute-once key parts
pub const KEY_PART_SEPARATOR: &str = ",";

/// Packed form of `true`
pub const KEY_PART_TRUE: &str = "1";

/// Packed form of `false`
pub const KEY_PART_FALSE: &str = "0";

// ============================================================================
// EXPIRY CONSTANTS
// ============================================================================

/// Stored expiry value meaning "never expires"
pub const NEVER_EXPIRES: i64 = 0;
