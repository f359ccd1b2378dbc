//! Common display utilities and helpers

use serde_json::Value;

/// Render a JSON value as plain text for a table cell
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "--".to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}
