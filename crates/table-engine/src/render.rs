//! Cell rendering for the presentation layer.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::column::{ColumnConfig, ColumnKind};
use crate::row::{field_text, value_text, Row};

const TRUNCATION_SUFFIX: &str = "...";

/// A rendered table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Text {
        value: String,
    },
    Avatar {
        src: Option<String>,
        alt: String,
    },
    Date {
        value: String,
    },
    Badge {
        label: String,
        active: bool,
    },
    Serial {
        value: usize,
    },
    /// Primary value with secondary lines drawn from `sub_fields`.
    Composite {
        primary: Box<Cell>,
        secondary: Vec<String>,
    },
}

/// Render `row`'s value for `column`.
///
/// `position` is the row's 1-based global position, shown by the serial column.
pub fn render_cell(column: &ColumnConfig, row: &Row, position: usize) -> Cell {
    let primary = match column.kind {
        ColumnKind::Serial => Cell::Serial { value: position },
        ColumnKind::Avatar => Cell::Avatar {
            src: field_text(row, &column.key),
            alt: column.display_label(),
        },
        ColumnKind::Date => match row.get(&column.key) {
            None | Some(Value::Null) => Cell::Empty,
            Some(value) => match format_date(value) {
                Some(formatted) => Cell::Date { value: formatted },
                None => text_cell(value, column.max_length),
            },
        },
        ColumnKind::Status => match field_text(row, &column.key) {
            Some(label) => Cell::Badge {
                active: label.eq_ignore_ascii_case("active"),
                label,
            },
            None => Cell::Empty,
        },
        ColumnKind::Text => match row.get(&column.key) {
            None | Some(Value::Null) => Cell::Empty,
            Some(value) => text_cell(value, column.max_length),
        },
    };

    if column.sub_fields.is_empty() {
        return primary;
    }

    let secondary = column
        .sub_fields
        .iter()
        .filter_map(|field| field_text(row, field))
        .collect();
    Cell::Composite {
        primary: Box::new(primary),
        secondary,
    }
}

fn text_cell(value: &Value, max_length: Option<usize>) -> Cell {
    let text = value_text(value).unwrap_or_default();
    Cell::Text {
        value: match max_length {
            Some(max) => truncate(&text, max),
            None => text,
        },
    }
}

/// Cut `text` to `max` characters, appending `...` when anything was removed.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str(TRUNCATION_SUFFIX);
    cut
}

/// Format a date-like value as `D MON YYYY` (e.g. `5 MAR 2026`).
///
/// Accepts RFC 3339 strings, `YYYY-MM-DD`, naive `YYYY-MM-DDTHH:MM:SS` (or with
/// a space separator), and integers as epoch milliseconds. Returns `None` for
/// anything else.
pub fn format_date(value: &Value) -> Option<String> {
    let date = match value {
        Value::String(s) => parse_date(s.trim())?,
        Value::Number(n) => DateTime::<Utc>::from_timestamp_millis(n.as_i64()?)?.date_naive(),
        _ => return None,
    };
    Some(date.format("%-d %b %Y").to_string().to_uppercase())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
