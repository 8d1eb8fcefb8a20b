//! Query String Encoding
//!
//! Turns optional filter objects into query strings for list endpoints.
//! Filters are plain `Serialize` structs; only fields that carry a value make
//! it into the query, and arrays become repeated keys
//! (`status=running&status=error`).

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Flatten a filter object into `(key, value)` pairs
///
/// Skipped: `null`, empty strings, empty arrays and nested objects.
/// Pairs come out in key order.
pub fn to_query_pairs<P>(params: &P) -> Result<Vec<(String, String)>>
where
    P: Serialize + ?Sized,
{
    let value = serde_json::to_value(params).context("Failed to serialize query parameters")?;

    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };

    let mut pairs = Vec::new();

    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in &items {
                    if let Some(s) = scalar_to_string(item) {
                        pairs.push((key.clone(), s));
                    }
                }
            },
            other => {
                if let Some(s) = scalar_to_string(&other) {
                    pairs.push((key, s));
                }
            },
        }
    }

    // Stable: repeated keys keep their element order
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(pairs)
}

/// Encode a filter object as `a=1&b=2` (no leading `?`)
pub fn build_query<P>(params: &P) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let pairs = to_query_pairs(params)?;

    Ok(pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

/// Append the encoded filter to `path`
///
/// Returns `path` unchanged when there is no filter or nothing to encode.
pub fn append_query<P>(path: &str, params: Option<&P>) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let Some(params) = params else {
        return Ok(path.to_string());
    };

    let query = build_query(params)?;

    if query.is_empty() {
        Ok(path.to_string())
    } else if path.contains('?') {
        Ok(format!("{}&{}", path, query))
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
