//! Block parameter defaulting and tolerant readers.
//!
//! Cosmetic parameters (variant, color, layout, speed, ...) never fail: an
//! unknown token falls back to the declared default entry of its style
//! table. Structural parameters (lists) report a [`RenderError`] instead,
//! which the composer isolates to the offending block.

use serde_json::Value;

use crate::error::RenderError;

/// Parameters of a block, keyed by name.
pub type Params = serde_json::Map<String, Value>;

/// Merge supplied parameters over defaults.
///
/// A supplied `null` counts as absent and keeps the default.
pub fn merge_params(defaults: &Params, supplied: &Params) -> Params {
    let mut merged = defaults.clone();
    for (key, value) in supplied {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Look up `key` in a style table.
pub fn lookup<K: PartialEq, V>(table: &[(K, V)], key: K) -> Option<&V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
}

/// Look up `key`, falling back to the `fallback` entry when the key is
/// absent or not in the table.
pub fn resolve_or_default<K, V>(table: &[(K, V)], key: Option<K>, fallback: K) -> Option<&V>
where
    K: PartialEq + Copy,
{
    key.and_then(|k| lookup(table, k))
        .or_else(|| lookup(table, fallback))
}

/// Resolve a string-keyed style token from params to its classes.
pub fn style(
    table: &[(&str, &'static str)],
    params: &Params,
    name: &str,
    fallback: &str,
) -> &'static str {
    resolve_or_default(table, params.str(name), fallback)
        .copied()
        .unwrap_or("")
}

/// Resolve a numeric column count to its classes.
///
/// Absent or non-numeric values use the fallback entry. A number without a
/// table entry yields no classes.
pub fn column_style(
    table: &[(u64, &'static str)],
    params: &Params,
    name: &str,
    fallback: u64,
) -> &'static str {
    let resolved = match params.get(name).filter(|v| !v.is_null()) {
        None => lookup(table, fallback),
        Some(value) => match value_u64(value) {
            Some(n) => lookup(table, n),
            None => lookup(table, fallback),
        },
    };
    resolved.copied().unwrap_or("")
}

/// Typed, tolerant readers over a parameter map.
pub trait ParamsExt {
    /// String value, if the key holds a string.
    fn str(&self, key: &str) -> Option<&str>;

    /// Scalar value as text; strings as-is, numbers and booleans formatted.
    /// Anything else is empty.
    fn text(&self, key: &str) -> String;

    /// Trimmed text, if non-empty.
    fn non_empty(&self, key: &str) -> Option<String>;

    /// Boolean, accepting `"true"`/`"false"` strings.
    fn bool(&self, key: &str) -> Option<bool>;

    /// Non-negative integer, accepting integral floats and numeric strings.
    fn u64(&self, key: &str) -> Option<u64>;

    /// Finite float, accepting numeric strings.
    fn f64(&self, key: &str) -> Option<f64>;

    /// List value. Absent keys read as empty; non-lists are an error.
    fn list(&self, key: &str) -> Result<&[Value], RenderError>;
}

impl ParamsExt for Params {
    fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn text(&self, key: &str) -> String {
        self.get(key).and_then(value_text).unwrap_or_default()
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        let text = self.text(key);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(value_u64)
    }

    fn f64(&self, key: &str) -> Option<f64> {
        let value = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    fn list(&self, key: &str) -> Result<&[Value], RenderError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(RenderError::param(key, "a list")),
        }
    }
}

/// Scalar JSON value as text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && f.is_finite())
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
