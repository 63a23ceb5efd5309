//! Adjacency graph over the passable cells of a [`CharGrid`].

use std::collections::HashMap;

use gridwalk_core::{CARDINALS, CharGrid, Point, Range};

use crate::error::{PathError, Result};

/// Path cost. Costs are non-negative and comfortably below `u64::MAX` for
/// any grid that fits in memory.
pub type Cost = u64;

/// A directed edge to an orthogonally adjacent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: Point,
    /// Base weight, before any turn penalty is applied.
    pub weight: Cost,
}

/// Weighted, directed graph of passable grid cells.
///
/// Every edge has base weight 1. The turn penalty is stored alongside the
/// adjacency but is only applied by the search, since whether a move is a
/// turn depends on how the current node was entered.
#[derive(Debug, Clone)]
pub struct GridGraph {
    adjacency: HashMap<Point, Vec<Edge>>,
    bounds: Range,
    turn_penalty: Cost,
}

impl GridGraph {
    /// Build the graph of `grid`, keeping cells whose character satisfies
    /// `passable`.
    ///
    /// Edges are listed per node in clockwise order starting from up.
    pub fn build(
        grid: &CharGrid,
        passable: impl Fn(char) -> bool,
        turn_penalty: Cost,
    ) -> Result<Self> {
        let open = |p: Point| grid.at(p).is_some_and(&passable);

        let mut adjacency = HashMap::new();
        let mut edges = 0;
        for (p, c) in grid.iter() {
            if !passable(c) {
                continue;
            }
            let out: Vec<Edge> = CARDINALS
                .iter()
                .map(|d| p + d.offset())
                .filter(|&n| open(n))
                .map(|to| Edge { to, weight: 1 })
                .collect();
            edges += out.len();
            adjacency.insert(p, out);
        }

        if adjacency.is_empty() {
            return Err(PathError::NoPassableCells);
        }

        log::debug!(
            "built grid graph over {}: {} nodes, {} edges, turn penalty {}",
            grid.bounds(),
            adjacency.len(),
            edges,
            turn_penalty
        );

        Ok(Self {
            adjacency,
            bounds: grid.bounds(),
            turn_penalty,
        })
    }

    /// Parse `rows` into a grid and build its graph.
    ///
    /// Fails with [`PathError::Grid`] if the rows have unequal lengths.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        passable: impl Fn(char) -> bool,
        turn_penalty: Cost,
    ) -> Result<Self> {
        let grid = CharGrid::from_rows(rows)?;
        Self::build(&grid, passable, turn_penalty)
    }

    /// Outgoing edges of `p`. Empty for walls and out-of-bounds points.
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Edge] {
        self.adjacency.get(&p).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `p` is a node of the graph.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.adjacency.contains_key(&p)
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Always false: construction rejects grids without passable cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Penalty added to a move that is perpendicular to the previous one.
    #[inline]
    pub fn turn_penalty(&self) -> Cost {
        self.turn_penalty
    }

    /// Bounds of the grid the graph was built from.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::GridError;

    fn open(c: char) -> bool {
        c != '#'
    }

    #[test]
    fn open_grid_edges() {
        let g = GridGraph::from_rows(&["...", "...", "..."], open, 0).unwrap();
        assert_eq!(g.len(), 9);
        // 12 undirected adjacencies, each in both directions.
        assert_eq!(g.edge_count(), 24);
        assert_eq!(g.neighbors(Point::new(1, 1)).len(), 4);
        assert_eq!(g.neighbors(Point::new(0, 0)).len(), 2);
        assert!(g.neighbors(Point::new(1, 1)).iter().all(|e| e.weight == 1));
    }

    #[test]
    fn neighbors_clockwise_from_up() {
        let g = GridGraph::from_rows(&["...", "...", "..."], open, 0).unwrap();
        let to: Vec<Point> = g.neighbors(Point::new(1, 1)).iter().map(|e| e.to).collect();
        assert_eq!(
            to,
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1),
            ]
        );
    }

    #[test]
    fn walls_are_not_nodes() {
        let g = GridGraph::from_rows(&["#.#", "...", "#.#"], open, 1000).unwrap();
        assert_eq!(g.len(), 5);
        assert!(!g.contains(Point::new(0, 0)));
        assert!(g.neighbors(Point::new(0, 0)).is_empty());
        assert!(g.neighbors(Point::new(7, 7)).is_empty());
        assert_eq!(g.neighbors(Point::new(1, 0)).len(), 1);
        assert_eq!(g.turn_penalty(), 1000);
        assert_eq!(g.bounds(), Range::new(0, 0, 3, 3));
    }

    #[test]
    fn custom_passable_predicate() {
        let g = GridGraph::from_rows(&["S.#", "#.E"], |c| matches!(c, '.' | 'S' | 'E'), 0).unwrap();
        assert_eq!(g.len(), 4);
        assert!(g.contains(Point::new(0, 0)));
        assert!(g.contains(Point::new(2, 1)));
    }

    #[test]
    fn malformed_grid() {
        let err = GridGraph::from_rows(&["...", "....", "..."], open, 0).unwrap_err();
        assert_eq!(
            err,
            PathError::Grid(GridError::Malformed {
                row: 1,
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn no_passable_cells() {
        let err = GridGraph::from_rows(&["##", "##"], open, 0).unwrap_err();
        assert_eq!(err, PathError::NoPassableCells);
        let rows: [&str; 0] = [];
        let err = GridGraph::from_rows(&rows, open, 0).unwrap_err();
        assert_eq!(err, PathError::NoPassableCells);
    }
}
