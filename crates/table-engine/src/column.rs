//! Column configuration and auto-detection.
//!
//! Screens usually pass explicit columns. When they don't, columns are derived
//! from the keys of the first row, skipping identifier-like keys and guessing a
//! render kind from the key name. The guess is a display convenience only;
//! nothing downstream depends on it being right.

use serde::{Deserialize, Serialize};

use crate::row::Row;

/// Key of the synthetic serial-number column.
pub const SERIAL_COLUMN_KEY: &str = "__serial";

/// Keys never turned into auto-detected columns (compared case-insensitively).
const IDENTIFIER_KEYS: &[&str] = &["id", "_id", "uuid", "objectid", "key"];

const AVATAR_HINTS: &[&str] = &["avatar", "profile", "image", "photo", "picture"];
const DATE_HINTS: &[&str] = &[
    "date",
    "created",
    "updated",
    "createdat",
    "updatedat",
    "lastvisit",
    "lasttreatment",
];
const STATUS_HINTS: &[&str] = &["status", "state", "condition"];

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[default]
    Text,
    /// Image URL shown as an avatar.
    Avatar,
    /// Date shown as `D MON YYYY`.
    Date,
    /// Two-state badge: `active` versus anything else.
    Status,
    /// Row position; only used by the synthetic serial column.
    Serial,
}

fn default_sortable() -> bool {
    true
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Row field this column reads.
    pub key: String,
    /// Header text; the humanized key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    #[serde(default)]
    pub kind: ColumnKind,
    /// Extra fields shown under the primary value (e.g. email under name).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<String>,
    /// Text longer than this many characters is truncated with `...`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Synthetic columns have no backing field and are never searched or sorted.
    #[serde(default)]
    pub synthetic: bool,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            sortable: true,
            kind: ColumnKind::Text,
            sub_fields: Vec::new(),
            max_length: None,
            synthetic: false,
        }
    }

    /// The synthetic serial-number column.
    pub fn serial() -> Self {
        Self {
            label: Some("S/N".to_string()),
            sortable: false,
            kind: ColumnKind::Serial,
            synthetic: true,
            ..Self::new(SERIAL_COLUMN_KEY)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_sub_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Whether clicking this column's header may change the sort.
    pub fn is_sortable(&self) -> bool {
        self.sortable && !self.synthetic
    }

    pub fn is_searchable(&self) -> bool {
        !self.synthetic
    }

    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| humanize_key(&self.key))
    }
}

/// Decide which columns a table shows.
///
/// Explicit columns win. Otherwise, when `auto_detect` is set and there is at
/// least one row, one column per key of the first row is derived (see
/// [`detect_kind`]). The serial column is prepended when requested.
pub fn resolve_columns(
    explicit: Option<&[ColumnConfig]>,
    rows: &[Row],
    auto_detect: bool,
    has_serial_number: bool,
) -> Vec<ColumnConfig> {
    let mut columns = Vec::new();
    if has_serial_number {
        columns.push(ColumnConfig::serial());
    }

    match explicit {
        Some(explicit) => columns.extend(explicit.iter().cloned()),
        None if auto_detect => {
            if let Some(first) = rows.first() {
                columns.extend(detect_columns(first));
            }
        }
        None => {}
    }

    columns
}

/// Derive columns from the keys of `row`, in key order.
pub fn detect_columns(row: &Row) -> Vec<ColumnConfig> {
    row.keys()
        .filter(|key| !is_identifier_key(key))
        .map(|key| ColumnConfig::new(key.as_str()).with_kind(detect_kind(key)))
        .collect()
}

fn is_identifier_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    IDENTIFIER_KEYS.contains(&lower.as_str())
}

/// Guess a render kind from a field name by case-insensitive substring match.
///
/// Avatar hints are checked before date hints, and date before status.
pub fn detect_kind(key: &str) -> ColumnKind {
    let lower = key.to_lowercase();
    let hit = |hints: &[&str]| hints.iter().any(|hint| lower.contains(hint));

    if hit(AVATAR_HINTS) {
        ColumnKind::Avatar
    } else if hit(DATE_HINTS) {
        ColumnKind::Date
    } else if hit(STATUS_HINTS) {
        ColumnKind::Status
    } else {
        ColumnKind::Text
    }
}

/// Turn a field name into header text: `lastVisit` and `last_visit` both
/// become `Last Visit`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
