/// Serde helpers for decoding loosely-typed caller input and upstream payloads
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Largest count the upstream accepts (GraphQL `Int` is a signed 32-bit value).
pub const MAX_COUNT: u32 = i32::MAX as u32;

/// Coerce an arbitrary JSON value into a non-negative pagination count.
///
/// - unsigned integers are kept (clamped to [`MAX_COUNT`])
/// - negative numbers, `NaN` and infinities become `0`
/// - fractional numbers are floored
/// - numeric strings are parsed with the same rules
/// - anything else (booleans, objects, garbage strings) becomes `0`
pub fn coerce_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.min(MAX_COUNT as u64) as u32
            } else {
                n.as_f64().map(floor_count).unwrap_or(0)
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map(floor_count).unwrap_or(0),
        _ => 0,
    }
}

fn floor_count(f: f64) -> u32 {
    if f.is_finite() && f > 0.0 {
        f.floor().min(MAX_COUNT as f64) as u32
    } else {
        0
    }
}

/// Coerce an arbitrary JSON value into a cursor string.
///
/// Strings pass through; numbers and booleans use their textual form; other
/// values use their compact JSON encoding.
pub fn coerce_cursor(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Deserialize an optional count leniently.
///
/// - Missing field or `null` → `None`
/// - Anything else → `Some(coerce_count(value))`
///
/// Usage:
/// ```ignore
/// #[derive(Deserialize)]
/// struct Page {
///     #[serde(default, deserialize_with = "crate::serde_utils::lenient_count")]
///     first: Option<u32>,
/// }
/// ```
pub fn lenient_count<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| coerce_count(&v)))
}

/// Deserialize an optional cursor leniently, stringifying non-string values.
pub fn lenient_cursor<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| coerce_cursor(&v)))
}
