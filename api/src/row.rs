//! Records returned by the query service.
//!
//! A row's shape depends entirely on the statement that produced it, so rows
//! stay untyped JSON objects and callers pull fields out by path.

use serde_json::Map;
use serde_json::Value;

/// One record from a query response.
pub type Row = Map<String, Value>;

/// Follows `path` through nested objects and arrays.
///
/// Numeric segments index into arrays, so `["outputs", "0", "payload"]` reads
/// `outputs[0].payload`.
pub fn value_at<'a>(row: &'a Row, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = row.get(*first)?;
    for segment in rest {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

pub fn str_at<'a>(row: &'a Row, path: &[&str]) -> Option<&'a str> {
    value_at(row, path)?.as_str()
}

/// Reads an integer, accepting numeric strings as well as JSON numbers.
pub fn i64_at(row: &Row, path: &[&str]) -> Option<i64> {
    match value_at(row, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
