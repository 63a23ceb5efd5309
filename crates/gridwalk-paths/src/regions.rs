//! Connected-region labelling of a character grid.

use gridwalk_core::{CharGrid, Point, Range};

/// Regions of a [`CharGrid`]: maximal groups of 4-connected cells holding
/// the same character.
#[derive(Debug, Clone)]
pub struct Regions {
    bounds: Range,
    labels: Vec<usize>,
    cells: Vec<Vec<Point>>,
}

impl Regions {
    /// Label every cell of `grid` with a region id.
    ///
    /// Ids are assigned in row-major order of each region's first cell.
    pub fn label(grid: &CharGrid) -> Self {
        let bounds = grid.bounds();
        let width = bounds.width().max(0) as usize;
        let idx = |p: Point| p.y as usize * width + p.x as usize;

        let mut labels = vec![usize::MAX; bounds.len()];
        let mut cells: Vec<Vec<Point>> = Vec::new();
        let mut stack: Vec<Point> = Vec::new();

        for (start, c) in grid.iter() {
            if labels[idx(start)] != usize::MAX {
                continue;
            }

            // Iterative DFS from `start`.
            let label = cells.len();
            let mut members = vec![start];
            labels[idx(start)] = label;
            stack.clear();
            stack.push(start);

            while let Some(cp) = stack.pop() {
                for np in cp.neighbors_4() {
                    if grid.at(np) != Some(c) || labels[idx(np)] != usize::MAX {
                        continue;
                    }
                    labels[idx(np)] = label;
                    members.push(np);
                    stack.push(np);
                }
            }

            cells.push(members);
        }

        log::debug!("labelled {} regions over {}", cells.len(), bounds);
        Self {
            bounds,
            labels,
            cells,
        }
    }

    /// Number of regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Region id of `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let width = self.bounds.width() as usize;
        Some(self.labels[p.y as usize * width + p.x as usize])
    }

    /// Cells of region `id`, in discovery order. Empty for unknown ids.
    pub fn cells(&self, id: usize) -> &[Point] {
        self.cells.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of cells in region `id`.
    pub fn area(&self, id: usize) -> usize {
        self.cells(id).len()
    }

    /// Number of unit cell sides of region `id` not shared with another cell
    /// of the same region.
    pub fn perimeter(&self, id: usize) -> usize {
        self.cells(id)
            .iter()
            .flat_map(|p| p.neighbors_4())
            .filter(|&n| self.at(n) != Some(id))
            .count()
    }

    /// Iterate over region ids.
    pub fn ids(&self) -> std::ops::Range<usize> {
        0..self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARDEN: &str = "\
AAAA
BBCD
BBCC
EEEC
";

    #[test]
    fn garden_regions() {
        let grid = CharGrid::parse(GARDEN).unwrap();
        let r = Regions::label(&grid);
        assert_eq!(r.len(), 5);

        let summary: Vec<(char, usize, usize)> = r
            .ids()
            .map(|id| {
                let c = grid.at(r.cells(id)[0]).unwrap();
                (c, r.area(id), r.perimeter(id))
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ('A', 4, 10),
                ('B', 4, 8),
                ('C', 4, 10),
                ('D', 1, 4),
                ('E', 3, 8),
            ]
        );

        let price: usize = r.ids().map(|id| r.area(id) * r.perimeter(id)).sum();
        assert_eq!(price, 140);
    }

    #[test]
    fn same_letter_separate_regions() {
        let grid = CharGrid::parse("X.X\n...\nX.X\n").unwrap();
        let r = Regions::label(&grid);
        // Four isolated X cells plus the connected dots.
        assert_eq!(r.len(), 5);
        assert_ne!(r.at(Point::new(0, 0)), r.at(Point::new(2, 0)));
        assert_eq!(r.at(Point::new(1, 0)), r.at(Point::new(1, 2)));
        assert_eq!(r.at(Point::new(3, 0)), None);
    }

    #[test]
    fn unknown_id_is_empty() {
        let grid = CharGrid::parse("ab\n").unwrap();
        let r = Regions::label(&grid);
        assert!(r.cells(7).is_empty());
        assert_eq!(r.area(7), 0);
        assert_eq!(r.perimeter(7), 0);
    }

    #[test]
    fn empty_grid() {
        let grid = CharGrid::parse("").unwrap();
        let r = Regions::label(&grid);
        assert!(r.is_empty());
        assert_eq!(r.at(Point::new(0, 0)), None);
    }
}
