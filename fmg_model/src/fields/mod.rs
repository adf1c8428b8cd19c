//! Defensive field access for untyped world data.
//!
//! FMG exports are plain JSON with no schema guarantees: numbers arrive as
//! text, arrays are sometimes keyed objects, and whole columns may be absent.
//! Everything here is total. A lookup that cannot be satisfied yields the
//! caller's default instead of an error.

use serde_json::{Map, Value};

/// Look up `index` in a positional or index-keyed container.
///
/// - sequence: `container[index]` when `0 <= index < len`
/// - mapping: the entry keyed by `index` rendered as text
/// - anything else (including `None`): no value
pub fn lookup_indexed(container: Option<&Value>, index: i64) -> Option<&Value> {
    match container? {
        Value::Array(items) => usize::try_from(index).ok().and_then(|i| items.get(i)),
        Value::Object(map) => map.get(&index.to_string()),
        _ => None,
    }
}

/// Like [`lookup_indexed`] but substitutes `default` when nothing is found.
pub fn get_indexed<'a>(container: Option<&'a Value>, index: i64, default: &'a Value) -> &'a Value {
    lookup_indexed(container, index).unwrap_or(default)
}

/// Types that can be coerced out of an arbitrary JSON value.
pub trait FromLoose: Sized {
    fn from_loose(value: &Value) -> Option<Self>;
}

impl FromLoose for i64 {
    fn from_loose(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl FromLoose for f64 {
    fn from_loose(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl FromLoose for bool {
    fn from_loose(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            // FMG encodes most flags as 0/1, and `port` as a feature id.
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromLoose for String {
    fn from_loose(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Id lists keep only the elements that coerce to integers.
impl FromLoose for Vec<i64> {
    fn from_loose(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.iter().filter_map(i64::from_loose).collect()),
            _ => None,
        }
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; the bound is exclusive.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Coerce `value` to `T`, returning `default` on absence or any failure.
pub fn cast<T: FromLoose>(value: Option<&Value>, default: T) -> T {
    value.and_then(T::from_loose).unwrap_or(default)
}

/// Read `key` from a record and coerce it, with a default.
pub fn field<T: FromLoose>(record: &Map<String, Value>, key: &str, default: T) -> T {
    cast(record.get(key), default)
}

/// Read a column of a column-oriented table at `index` and coerce it.
pub fn column<T: FromLoose>(table: &Map<String, Value>, key: &str, index: i64, default: T) -> T {
    cast(lookup_indexed(table.get(key), index), default)
}
