//! Error types for graph construction and search queries.

use gridwalk_core::{GridError, Point};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The input rows could not form a rectangular grid.
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("grid has no passable cells")]
    NoPassableCells,

    /// A search was started from a point that is a wall or out of bounds.
    #[error("{0} is not a passable node of the graph")]
    NotANode(Point),

    /// The queried node was never reached. Callers usually treat this as
    /// "no path exists" rather than as a failure.
    #[error("{0} is not reachable from the source")]
    Unreachable(Point),
}

pub type Result<T> = std::result::Result<T, PathError>;
