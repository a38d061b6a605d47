//! The assembled table view model.
//!
//! [`build_view`] runs the whole pipeline for one render: resolve columns,
//! search, sort, paginate, render cells and attach positional identifiers.
//! UI state lives in [`TableState`], owned by the caller and passed in each
//! time; the engine keeps nothing between calls.

use serde::{Deserialize, Serialize};

use crate::column::{resolve_columns, ColumnConfig, ColumnKind};
use crate::paginate::{paginate, total_pages};
use crate::render::{render_cell, Cell};
use crate::row::Row;
use crate::search::search;
use crate::selection::{header_state, row_position, HeaderCheckState, Selection};
use crate::sort::{sort_rows, SortConfig, SortDirection};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Who slices rows into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pagination {
    /// The engine holds every row and slices out the current page.
    #[default]
    Internal,
    /// The data source already returned only the current page; `total_count`
    /// is the size of the full result set.
    External { total_count: usize },
}

/// Per-table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Derive columns from the first row when none are given.
    pub auto_detect_columns: bool,
    /// Prepend the synthetic serial-number column.
    pub serial_number: bool,
    /// Rows per page when the state does not override it.
    pub page_size: usize,
    pub pagination: Pagination,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            auto_detect_columns: true,
            serial_number: false,
            page_size: DEFAULT_PAGE_SIZE,
            pagination: Pagination::Internal,
        }
    }
}

/// Caller-held UI state threaded through each render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
    pub search_term: String,
    pub sort: SortConfig,
    /// 1-based current page.
    pub page: usize,
    /// Overrides [`TableOptions::page_size`] when set.
    pub page_size: Option<usize>,
    pub selected_ids: Selection,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: SortConfig::default(),
            page: 1,
            page_size: None,
            selected_ids: Selection::new(),
        }
    }
}

impl TableState {
    /// New search term; returns to the first page.
    pub fn search_for(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            page: 1,
            ..self.clone()
        }
    }

    /// Header click on `column` (see [`SortConfig::toggle`]).
    pub fn sort_by(&self, column: &ColumnConfig) -> Self {
        Self {
            sort: self.sort.toggle(column),
            ..self.clone()
        }
    }

    pub fn go_to_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// New page size; returns to the first page.
    pub fn with_page_size(&self, page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_selection(&self, selected_ids: Selection) -> Self {
        Self {
            selected_ids,
            ..self.clone()
        }
    }
}

/// A column as the header row shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewColumn {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub sort_direction: SortDirection,
}

/// A rendered row on the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    /// Positional identifier (see [`crate::selection`]).
    pub id: String,
    pub selected: bool,
    pub cells: Vec<Cell>,
    /// The source row, for actions such as "open patient".
    pub data: Row,
}

/// Everything the table widget needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<ViewColumn>,
    pub rows: Vec<ViewRow>,
    /// Rows matching the search (or the external total).
    pub total_rows: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub selected_ids: Selection,
    pub header: HeaderCheckState,
}

/// A sort on a column that may not be sorted is dropped.
fn effective_sort(columns: &[ColumnConfig], sort: &SortConfig) -> SortConfig {
    let blocked = sort
        .active_key()
        .is_some_and(|key| columns.iter().any(|c| c.key == key && !c.is_sortable()));
    if blocked {
        SortConfig::default()
    } else {
        sort.clone()
    }
}

/// Build the view model for one render of a table.
///
/// Pipeline: resolve columns, search, sort, then slice the current page
/// (internal pagination) or take the rows as the page (external pagination).
/// Row ids are positional and the selection in `state` is passed through
/// untouched. Rows whose position would overflow `usize` are not shown.
pub fn build_view(
    rows: &[Row],
    explicit_columns: Option<&[ColumnConfig]>,
    options: &TableOptions,
    state: &TableState,
) -> TableView {
    let columns = resolve_columns(
        explicit_columns,
        rows,
        options.auto_detect_columns,
        options.serial_number,
    );
    let page_size = state.page_size.unwrap_or(options.page_size);

    let filtered = search(rows, &columns, &state.search_term);
    let sort = effective_sort(&columns, &state.sort);
    let sorted = sort_rows(&filtered, &sort);

    let (page_rows, total_rows) = match options.pagination {
        Pagination::Internal => (paginate(&sorted, state.page, page_size), sorted.len()),
        Pagination::External { total_count } => (sorted.as_slice(), total_count),
    };

    let view_rows: Vec<ViewRow> = page_rows
        .iter()
        .enumerate()
        .map_while(|(index, row)| {
            let position = row_position(state.page, page_size, index)?;
            let id = position.to_string();
            Some(ViewRow {
                selected: state.selected_ids.contains(&id),
                cells: columns
                    .iter()
                    .map(|column| render_cell(column, row, position))
                    .collect(),
                data: row.clone(),
                id,
            })
        })
        .collect();

    let header = header_state(&state.selected_ids, view_rows.len(), state.page, page_size);

    let view_columns = columns
        .iter()
        .map(|column| ViewColumn {
            key: column.key.clone(),
            label: column.display_label(),
            kind: column.kind,
            sortable: column.is_sortable(),
            sort_direction: sort.direction_for(column),
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        matched = filtered.len(),
        page = state.page,
        page_size,
        shown = view_rows.len(),
        "built table view"
    );

    TableView {
        columns: view_columns,
        rows: view_rows,
        total_rows,
        total_pages: total_pages(total_rows, page_size),
        page: state.page,
        page_size,
        selected_ids: state.selected_ids.clone(),
        header,
    }
}
