use serde_json::Value;

/// The literal placeholder form referencing parameter `name`.
pub fn placeholder(name: &str) -> String {
    format!("${{{}}}", name)
}

/// Whether any leaf of `value` equals the `${name}` placeholder exactly.
///
/// Leaves are booleans, numbers and strings; objects and arrays are recursed
/// into generically, independent of any schema. Partial-string interpolation
/// does not exist in the topology format, so only a whole-string match
/// counts.
pub fn references_placeholder(value: &Value, name: &str) -> bool {
    let needle = placeholder(name);
    leaf_matches(value, &needle)
}

fn leaf_matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(text) => text == needle,
        Value::Array(items) => items.iter().any(|item| leaf_matches(item, needle)),
        Value::Object(map) => map.values().any(|item| leaf_matches(item, needle)),
        Value::Bool(_) | Value::Number(_) | Value::Null => false,
    }
}

/// Rebuilds `value` with every leaf equal to the `${name}` placeholder
/// replaced by an empty string. The input is never mutated; new objects and
/// arrays are produced as the walk returns, so callers can diff old against
/// new. Applying the same removal twice is a no-op the second time.
pub fn strip_placeholder(value: &Value, name: &str) -> Value {
    let needle = placeholder(name);
    strip(value, &needle)
}

fn strip(value: &Value, needle: &str) -> Value {
    match value {
        Value::String(text) if text == needle => Value::String(String::new()),
        Value::Array(items) => Value::Array(items.iter().map(|item| strip(item, needle)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), strip(item, needle)))
                .collect(),
        ),
        other => other.clone(),
    }
}
