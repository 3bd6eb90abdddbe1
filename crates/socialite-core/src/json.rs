// Silent JSON field access — missing keys and type mismatches yield
// `None`. Providers signal failure through empty responses rather than
// structured errors, so accessors must not raise; the flow driver decides
// what absence means.

use serde_json::Value;

/// Read a string field from a JSON object. Numeric values are
/// stringified, the way some providers deliver numeric ids.
pub fn str_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read an integer field from a JSON object, accepting numeric strings.
pub fn int_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_field_handles_missing_and_numeric() {
        let value = serde_json::json!({"id": 123, "name": "zhangsan"});

        assert_eq!(str_field(&value, "name"), Some("zhangsan".to_string()));
        assert_eq!(str_field(&value, "id"), Some("123".to_string()));
        assert_eq!(str_field(&value, "missing"), None);
        assert_eq!(str_field(&serde_json::Value::Null, "name"), None);
    }

    #[test]
    fn int_field_accepts_numeric_strings() {
        let value = serde_json::json!({"expires_in": 7200, "retry": "30"});

        assert_eq!(int_field(&value, "expires_in"), Some(7200));
        assert_eq!(int_field(&value, "retry"), Some(30));
        assert_eq!(int_field(&value, "missing"), None);
    }
}
