//! Query-string encoding of request parameters.
//!
//! Nested objects use bracket notation and arrays repeat the key with `[]`:
//!
//! ```text
//! { "filters": { "card_last_digits": "4242" }, "tags": ["a", "b"] }
//!   => filters[card_last_digits]=4242&tags[]=a&tags[]=b
//! ```

use serde_json::Value;

use crate::domain::Attributes;

/// Flatten parameters into ordered key/value pairs. Nulls are dropped.
pub fn flatten_params(params: &Attributes) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        flatten_value(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_value(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten_value(format!("{}[]", key), item, pairs);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten_value(format!("{}[{}]", key, sub), item, pairs);
            }
        }
    }
}
