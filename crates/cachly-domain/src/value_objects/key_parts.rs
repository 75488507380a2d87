//! Compute-once key packing
//!
//! `once` identifies a computation by a list of parts. The parts are packed
//! into one string key: booleans become `1`/`0`, strings are used as-is,
//! numbers use their JSON text, `null` is empty, arrays are packed
//! recursively and objects become `name=value` pairs in key order. Parts are
//! joined with a comma.

use crate::constants::{KEY_PART_FALSE, KEY_PART_SEPARATOR, KEY_PART_TRUE};
use crate::error::{Error, Result};
use serde_json::Value;

/// Pack compute-once key parts into a single key
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `parts` is empty.
pub fn pack_key_parts(parts: &[Value]) -> Result<String> {
    if parts.is_empty() {
        return Err(Error::invalid_argument(
            "At least one key part is required",
        ));
    }
    Ok(pack_all(parts))
}

fn pack_all(parts: &[Value]) -> String {
    parts
        .iter()
        .map(pack_one)
        .collect::<Vec<_>>()
        .join(KEY_PART_SEPARATOR)
}

fn pack_one(part: &Value) -> String {
    match part {
        Value::Null => String::new(),
        Value::Bool(true) => KEY_PART_TRUE.to_string(),
        Value::Bool(false) => KEY_PART_FALSE.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => pack_all(items),
        Value::Object(fields) => fields
            .iter()
            .map(|(name, value)| format!("{name}={}", pack_one(value)))
            .collect::<Vec<_>>()
            .join(KEY_PART_SEPARATOR),
    }
}
