use serde_json::Value;

/// Stringify a primitive report value for display and comparison.
///
/// Non-primitive values (arrays, objects) and `null` become `""`.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub fn sanitize_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
