//! # table-engine
//!
//! The data-table core shared by every list screen (patients, dentists,
//! treatment plans). Rows are arbitrary JSON objects; the engine searches,
//! sorts, pages and selects them and hands back a render-ready view model.
//!
//! ## Quick start
//!
//! ```rust
//! use table_engine::{build_view, rows_from_json, TableOptions, TableState};
//!
//! let rows = rows_from_json(r#"[{"name":"Bob","age":41},{"name":"Ann","age":30}]"#).unwrap();
//! let state = TableState { search_term: "an".into(), ..TableState::default() };
//!
//! let view = build_view(&rows, None, &TableOptions::default(), &state);
//! assert_eq!(view.total_rows, 1);
//! assert_eq!(view.rows[0].id, "1");
//! ```
//!
//! ## Modules
//!
//! - [`row`] — `Row` type, JSON parsing, value stringification and ordering
//! - [`column`] — Column configuration and auto-detection from the first row
//! - [`render`] — Cell rendering (text, avatar, date, status badge, serial)
//! - [`search`] — Case-insensitive substring search across columns
//! - [`sort`] — Tri-state single-column sort
//! - [`paginate`] — 1-indexed offset pagination
//! - [`selection`] — Position-derived row identifiers and selection sets
//! - [`view`] — The assembled table view model
//! - [`error`] — Error types

pub mod column;
pub mod error;
pub mod paginate;
pub mod render;
pub mod row;
pub mod search;
pub mod selection;
pub mod sort;
pub mod view;

pub use column::{resolve_columns, ColumnConfig, ColumnKind};
pub use error::TableError;
pub use paginate::{paginate, total_pages};
pub use render::{render_cell, Cell};
pub use row::{rows_from_json, Row};
pub use search::search;
pub use selection::{
    header_state, page_ids, row_id, row_position, select_all, toggle_row, HeaderCheckState,
    Selection,
};
pub use sort::{sort_rows, SortConfig, SortDirection};
pub use view::{build_view, Pagination, TableOptions, TableState, TableView};
