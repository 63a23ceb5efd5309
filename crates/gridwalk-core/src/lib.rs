//! **gridwalk-core**: geometry and grid primitives for puzzle maps.
//!
//! This crate provides the foundational types shared by the *gridwalk*
//! crates: integer points, compass directions, rectangular ranges, and an
//! immutable character grid parsed from puzzle text.

pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;

pub use direction::{CARDINALS, DIAGONALS, Direction};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::CharGrid;
