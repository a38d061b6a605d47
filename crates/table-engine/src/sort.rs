//! Tri-state single-column sorting.
//!
//! Clicking a column header cycles `none -> asc -> desc -> none`. Clicking a
//! different column always starts it at `asc`; there is no per-column memory.

use serde::{Deserialize, Serialize};

use crate::column::ColumnConfig;
use crate::row::{compare_values, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    None,
}

impl SortDirection {
    /// The next state in the header-click cycle.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }
}

/// The table's active sort, held by the caller between renders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Desc,
        }
    }

    /// The sort key when the config actually orders rows.
    pub fn active_key(&self) -> Option<&str> {
        match self.direction {
            SortDirection::None => None,
            _ => self.key.as_deref(),
        }
    }

    /// Direction shown in `column`'s header.
    pub fn direction_for(&self, column: &ColumnConfig) -> SortDirection {
        match self.key.as_deref() {
            Some(key) if key == column.key => self.direction,
            _ => SortDirection::None,
        }
    }

    /// The config after the user activates `column`'s header.
    ///
    /// Same column: advance the cycle. Other column: start at `asc`.
    /// Unsortable and synthetic columns leave the config unchanged.
    pub fn toggle(&self, column: &ColumnConfig) -> SortConfig {
        if !column.is_sortable() {
            return self.clone();
        }
        let direction = match self.key.as_deref() {
            Some(key) if key == column.key => self.direction.next(),
            _ => SortDirection::Asc,
        };
        SortConfig {
            key: Some(column.key.clone()),
            direction,
        }
    }
}

/// Return `rows` ordered by `sort`, stably.
///
/// Null and missing values are smallest, so they lead in `asc` and trail in
/// `desc`. Equal values keep their input order in both directions. A config
/// with no key or direction `none` returns the rows unchanged.
///
/// A column that mixes value types sorts by type first (see
/// [`crate::row::compare_values`]).
pub fn sort_rows(rows: &[Row], sort: &SortConfig) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    let Some(key) = sort.active_key() else {
        return sorted;
    };

    match sort.direction {
        SortDirection::Asc => sorted.sort_by(|a, b| compare_values(a.get(key), b.get(key))),
        SortDirection::Desc => sorted.sort_by(|a, b| compare_values(b.get(key), a.get(key))),
        SortDirection::None => {}
    }

    sorted
}
