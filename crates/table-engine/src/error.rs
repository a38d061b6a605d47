//! Error types for table input parsing.

use thiserror::Error;

/// Errors raised while turning caller input into rows or columns.
///
/// The table operations themselves are total; only parsing can fail.
#[derive(Error, Debug)]
pub enum TableError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The top-level JSON value was not an array.
    #[error("Expected a JSON array of rows")]
    NotAnArray,

    /// An element of the row array was not a JSON object.
    #[error("Row {index} is not a JSON object")]
    RowNotObject { index: usize },
}

/// Convenience alias used throughout table-engine.
pub type Result<T> = std::result::Result<T, TableError>;
