//! Unit tests for compute-once key packing

use cachly_domain::Error;
use cachly_domain::value_objects::pack_key_parts;
use serde_json::json;

#[test]
fn test_scalar_parts() {
    let key = pack_key_parts(&[json!("report"), json!(2024), json!(true), json!(false)]).unwrap();
    assert_eq!(key, "report,2024,1,0");
}

#[test]
fn test_null_part_is_empty() {
    let key = pack_key_parts(&[json!("a"), json!(null), json!("b")]).unwrap();
    assert_eq!(key, "a,,b");
}

#[test]
fn test_array_parts_are_flattened() {
    let key = pack_key_parts(&[json!("ids"), json!([1, 2, [3, true]])]).unwrap();
    assert_eq!(key, "ids,1,2,3,1");
}

#[test]
fn test_object_parts_become_pairs() {
    let key = pack_key_parts(&[json!({"a": 1, "b": true})]).unwrap();
    assert_eq!(key, "a=1,b=1");
}

#[test]
fn test_single_string_part_is_unchanged() {
    assert_eq!(pack_key_parts(&[json!("plain")]).unwrap(), "plain");
}

#[test]
fn test_empty_parts_are_rejected() {
    let result = pack_key_parts(&[]);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}
