//! Helpers for reading typed parameters out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. Missing keys and
//! values of the wrong type yield the default, so these never fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`. JSON integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`.
///
/// Only non-negative integers are accepted.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts an `i64` from `params[name]`.
pub fn param_i64(params: &Value, name: &str, default: i64) -> i64 {
    params.get(name).and_then(Value::as_i64).unwrap_or(default)
}
