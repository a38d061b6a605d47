//! Rows are plain JSON objects with no fixed shape.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::error::{Result, TableError};

/// One table row: field name to JSON value, in insertion order.
pub type Row = Map<String, Value>;

/// Parse a JSON array of objects into rows.
///
/// # Errors
///
/// Returns `TableError::JsonParse` for invalid JSON, `TableError::NotAnArray`
/// when the top-level value is not an array, and `TableError::RowNotObject`
/// for the first element that is not an object.
pub fn rows_from_json(json: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(TableError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(TableError::RowNotObject { index }),
        })
        .collect()
}

/// Display text of a field value; `None` for null.
///
/// Strings are returned as-is (no quotes), numbers and booleans in their JSON
/// spelling, arrays and objects as compact JSON.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Display text of `row[key]`; `None` when missing or null.
pub fn field_text(row: &Row, key: &str) -> Option<String> {
    row.get(key).and_then(value_text)
}

/// Order two field values for sorting.
///
/// Missing and null values are smallest and equal to each other. Other values
/// are ranked by JSON type first (`bool < number < string < array < object`),
/// then compared natively within their type. The cross-type ranking is
/// arbitrary; it only keeps the order total when a column mixes types.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => type_rank(x)
            .cmp(&type_rank(y))
            .then_with(|| compare_same_type(x, y)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_same_type(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => number_key(x).total_cmp(&number_key(y)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        // Arrays and objects order by their compact JSON text.
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn number_key(n: &serde_json::Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}
