//! Error types for grid parsing.

use thiserror::Error;

/// Structural problems found while reading a character grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    #[error("malformed grid: row {row} has {found} cells, expected {expected}")]
    Malformed {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
