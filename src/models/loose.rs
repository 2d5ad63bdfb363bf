//! Coercion helpers for loosely-shaped upstream JSON.
//!
//! The upstream payload has changed field names over time, so most fields are
//! read through an ordered list of candidates. Two flavours of "first" exist:
//! [`first_truthy`] skips anything falsy (absent, `null`, `false`, `0`, `""`),
//! [`first_present`] only skips absent and `null`.

use serde_json::Value;

pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|x| x != 0.0 && !x.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn first_truthy<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|c| c.as_ref())
        .find(|v| is_truthy(v))
}

pub fn first_present<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|c| c.as_ref())
        .find(|v| !v.is_null())
}

/// Text form of a scalar, the way it would be interpolated into markup.
pub fn to_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose number coercion: numbers as-is, numeric strings parsed, booleans 0/1,
/// everything else NaN.
pub fn to_number(v: &Value) -> f64 {
    match v {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                t.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}
