use crate::common::Value;
use itertools::Itertools;
use serde_json::Number;

/// Renders a value the way it is compared and indexed.
///
/// Strings are returned verbatim, integral numbers without a fraction,
/// arrays as their stringified elements joined by `,` and objects as compact
/// JSON text.
///
/// # Examples
///
/// ```
/// use doodle::common::stringify_value;
/// use serde_json::json;
///
/// assert_eq!(stringify_value(&json!("Alice")), "Alice");
/// assert_eq!(stringify_value(&json!(5.0)), "5");
/// assert_eq!(stringify_value(&json!([1, "a", true])), "1,a,true");
/// ```
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify_value).join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn format_number(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }

    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.is_finite() => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

/// Parses the string form of a value as a finite number.
///
/// Surrounding whitespace is ignored; empty strings and anything that is not
/// a finite decimal number yield `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Returns `true` for values that are skipped when an index is built:
/// `null`, `false`, `0` and the empty string.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
