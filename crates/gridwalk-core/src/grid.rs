//! The [`CharGrid`] type: a rectangular snapshot of puzzle input.
//!
//! Rows are stored contiguously in row-major order. A grid is immutable once
//! parsed; puzzles that change the map build a new grid.

use crate::error::{GridError, Result};
use crate::geom::{Point, Range};

/// A rectangular 2D grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<char>,
    bounds: Range,
}

impl CharGrid {
    /// Build a grid from rows of equal length.
    ///
    /// Fails with [`GridError::Malformed`] on the first row whose length
    /// differs from the first row's. Zero rows yield an empty grid.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = 0;
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let found = cells.len() - before;
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::Malformed {
                    row,
                    expected: width,
                    found,
                });
            }
        }
        Ok(Self {
            cells,
            bounds: Range::new(0, 0, width as i32, rows.len() as i32),
        })
    }

    /// Parse puzzle text, one row per line. Blank lines are skipped and
    /// trailing carriage returns are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    /// A `width` × `height` grid filled with `fill`.
    pub fn filled(width: i32, height: i32, fill: char) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![fill; bounds.len()],
            bounds,
        }
    }

    /// The bounding range, always anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// The character at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<char> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Return a copy of the grid with `p` overwritten. Out-of-bounds points
    /// leave the copy unchanged.
    pub fn with(&self, p: Point, c: char) -> Self {
        let mut g = self.clone();
        if let Some(i) = g.index(p) {
            g.cells[i] = c;
        }
        g
    }

    /// First point (row-major) holding `c`.
    pub fn find(&self, c: char) -> Option<Point> {
        self.iter().find(|&(_, v)| v == c).map(|(p, _)| p)
    }

    /// All points holding `c`, row-major.
    pub fn find_all(&self, c: char) -> Vec<Point> {
        self.iter().filter(|&(_, v)| v == c).map(|(p, _)| p).collect()
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, char) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }

    /// Iterate over `(Point, char)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl std::fmt::Display for CharGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.width().max(1) as usize;
        for row in self.cells.chunks(w) {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
