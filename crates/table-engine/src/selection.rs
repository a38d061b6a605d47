//! Row selection keyed by position.
//!
//! A row's identifier is its 1-based position in the sorted, filtered list:
//! `(page - 1) * page_size + local_index + 1`. Identifiers never come from the
//! row data, so tables work with rows that have no id field. The price is that
//! a selection refers to positions: after a re-sort, a new search term or a
//! page-size change, the same ids point at different rows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selected row identifiers.
pub type Selection = BTreeSet<String>;

/// Header checkbox state for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderCheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// 1-based global position of the row at `local_index` (0-based) on `page`.
///
/// `None` when the position does not fit in `usize`.
pub fn row_position(page: usize, page_size: usize, local_index: usize) -> Option<usize> {
    page.saturating_sub(1)
        .checked_mul(page_size)?
        .checked_add(local_index)?
        .checked_add(1)
}

/// Identifier of the row at `local_index` (0-based) on `page` (1-based).
pub fn row_id(page: usize, page_size: usize, local_index: usize) -> Option<String> {
    row_position(page, page_size, local_index).map(|position| position.to_string())
}

/// Ids of the page's rows in display order, stopping at the first position
/// that overflows.
pub fn page_ids(page_len: usize, page: usize, page_size: usize) -> impl Iterator<Item = String> {
    (0..page_len).map_while(move |i| row_id(page, page_size, i))
}

/// Select every row on the current page, and only those.
///
/// Rows on other pages are never selected, so no identifiers are produced for
/// rows that were not rendered.
pub fn select_all(page_len: usize, page: usize, page_size: usize) -> Selection {
    page_ids(page_len, page, page_size).collect()
}

/// `selected` with `row_id` added (`checked`) or removed.
pub fn toggle_row(selected: &Selection, row_id: &str, checked: bool) -> Selection {
    let mut next = selected.clone();
    if checked {
        next.insert(row_id.to_string());
    } else {
        next.remove(row_id);
    }
    next
}

/// Header checkbox state: how many of the current page's rows are selected.
pub fn header_state(
    selected: &Selection,
    page_len: usize,
    page: usize,
    page_size: usize,
) -> HeaderCheckState {
    let on_page = page_ids(page_len, page, page_size)
        .filter(|id| selected.contains(id))
        .count();

    if on_page == 0 {
        HeaderCheckState::Unchecked
    } else if on_page == page_len {
        HeaderCheckState::Checked
    } else {
        HeaderCheckState::Indeterminate
    }
}
