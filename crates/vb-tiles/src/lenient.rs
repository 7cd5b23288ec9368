//! Field-level tolerant deserializers.
//!
//! Stored tile state is whatever an earlier (or later) build wrote. A field of
//! the wrong type falls back to its default instead of failing the whole
//! record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, or `T::default()` on a type mismatch.
pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Deserialize a list, skipping elements that do not fit `T`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(list_from_value(raw))
}

/// Number from a JSON number or a numeric string, else 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(number_from_value(&raw))
}

/// Integer from a JSON number (floats truncate) or a numeric string, else 0.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw.as_i64() {
        Some(n) => n,
        None => number_from_value(&raw) as i64,
    })
}

pub(crate) fn list_from_value<T: DeserializeOwned>(raw: Value) -> Vec<T> {
    match raw {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn number_from_value(raw: &Value) -> f64 {
    let n = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Render like a JavaScript number: no trailing `.0` for whole values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_from_strings() {
        assert_eq!(number_from_value(&json!("12.5")), 12.5);
        assert_eq!(number_from_value(&json!("abc")), 0.0);
        assert_eq!(number_from_value(&json!(null)), 0.0);
        assert_eq!(number_from_value(&json!(3)), 3.0);
    }

    #[test]
    fn list_skips_bad_items() {
        let items: Vec<i64> = list_from_value(json!([1, "two", 3]));
        assert_eq!(items, vec![1, 3]);
        let none: Vec<i64> = list_from_value(json!({"a": 1}));
        assert!(none.is_empty());
    }

    #[test]
    fn formats_whole_numbers_without_fraction() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-4.0), "-4");
    }
}
