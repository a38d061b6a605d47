//! Free-text search across table columns.

use crate::column::ColumnConfig;
use crate::row::{field_text, Row};

/// Keep rows where any searchable column contains `term`, ignoring case.
///
/// Values are compared by their display text (see [`crate::row::value_text`]);
/// null and missing fields never match. Synthetic columns are skipped. A blank
/// (empty or whitespace-only) term returns every row unchanged and in order;
/// any other term is matched as given, whitespace included.
pub fn search(rows: &[Row], columns: &[ColumnConfig], term: &str) -> Vec<Row> {
    if term.trim().is_empty() {
        return rows.to_vec();
    }
    let needle = term.to_lowercase();

    let searchable: Vec<&ColumnConfig> = columns.iter().filter(|c| c.is_searchable()).collect();

    let matches: Vec<Row> = rows
        .iter()
        .filter(|row| {
            searchable.iter().any(|column| {
                field_text(row, &column.key)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect();

    tracing::trace!(term = %needle, rows = rows.len(), matches = matches.len(), "searched rows");
    matches
}
