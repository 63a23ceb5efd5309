//! Single-source Dijkstra search that keeps every tied predecessor.
//!
//! The search works on *labels*: a node plus the direction it was entered
//! from. Turn penalties make a move's cost depend on that direction, so two
//! arrivals at the same node with different headings are kept apart. When
//! the turn penalty is zero the heading is dropped and a label is just the
//! node.
//!
//! A label is marked visited together with the cost it was popped at, so the
//! same label may be expanded again if it shows up at a different cost.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use gridwalk_core::{Direction, Point};

use crate::error::{PathError, Result};
use crate::graph::{Cost, GridGraph};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Options for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Extra cost for a move perpendicular to the previous one.
    pub turn_penalty: Cost,
    /// Heading of the walker at the source. `None` makes the first move free
    /// of any turn penalty.
    pub start_heading: Option<Direction>,
    /// Stop as soon as this node is popped from the queue.
    pub stop_at: Option<Point>,
}

impl SearchConfig {
    /// Default options using the turn penalty the graph was built with.
    pub fn for_graph(graph: &GridGraph) -> Self {
        Self {
            turn_penalty: graph.turn_penalty(),
            ..Self::default()
        }
    }

    pub fn with_start_heading(mut self, heading: Direction) -> Self {
        self.start_heading = Some(heading);
        self
    }

    pub fn with_stop_at(mut self, target: Point) -> Self {
        self.stop_at = Some(target);
        self
    }
}

// ---------------------------------------------------------------------------
// Labels and queue entries
// ---------------------------------------------------------------------------

/// A search state: a node and the heading used to enter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct Label {
    pub(crate) pos: Point,
    pub(crate) heading: Option<Direction>,
}

#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    cost: Cost,
    label: Label,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest label first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.label.cmp(&self.label))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Result tables
// ---------------------------------------------------------------------------

/// A position with an associated cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: Cost,
}

/// Minimum cost from the source to every reached node.
///
/// Unreached nodes are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceTable {
    costs: HashMap<Point, Cost>,
}

impl DistanceTable {
    pub(crate) fn from_map(costs: HashMap<Point, Cost>) -> Self {
        Self { costs }
    }

    /// Cost to reach `p`, or `None` if it was never reached.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cost> {
        self.costs.get(&p).copied()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.costs.contains_key(&p)
    }

    /// Number of reached nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Reached nodes with their costs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cost)> + '_ {
        self.costs.iter().map(|(&p, &c)| (p, c))
    }

    /// Reached nodes sorted by cost, then row-major.
    pub fn to_path_nodes(&self) -> Vec<PathNode> {
        let mut nodes: Vec<PathNode> = self
            .iter()
            .map(|(pos, cost)| PathNode { pos, cost })
            .collect();
        nodes.sort_by(|a, b| a.cost.cmp(&b.cost).then(a.pos.cmp(&b.pos)));
        nodes
    }
}

/// Every predecessor lying on some cost-minimal path, per node.
///
/// Predecessors are kept per label so that reconstruction follows the exact
/// arrival heading of each path; [`of`](Self::of) gives the per-node view.
#[derive(Debug, Clone, Default)]
pub struct PredecessorSet {
    pub(crate) parents: HashMap<Label, Vec<Label>>,
    /// Labels whose cost equals their node's minimum distance.
    pub(crate) optimal: HashMap<Point, Vec<Label>>,
}

impl PredecessorSet {
    /// Nodes that immediately precede `p` on at least one cost-minimal path
    /// to `p`. Empty for the source and for unreached nodes.
    pub fn of(&self, p: Point) -> HashSet<Point> {
        self.optimal
            .get(&p)
            .into_iter()
            .flatten()
            .filter_map(|l| self.parents.get(l))
            .flatten()
            .map(|l| l.pos)
            .collect()
    }

    /// Whether `p` was reached by the search that produced this set.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.optimal.contains_key(&p)
    }
}

// ---------------------------------------------------------------------------
// ShortestPaths
// ---------------------------------------------------------------------------

/// Outcome of a single-source search: distances plus tied predecessors.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: Point,
    distances: DistanceTable,
    predecessors: PredecessorSet,
}

impl ShortestPaths {
    /// Search from `source` using the graph's own turn penalty.
    pub fn compute(graph: &GridGraph, source: Point) -> Result<Self> {
        Self::compute_with(graph, source, &SearchConfig::for_graph(graph))
    }

    /// Search from `source` with explicit options.
    ///
    /// Fails with [`PathError::NotANode`] if `source` is not passable.
    pub fn compute_with(graph: &GridGraph, source: Point, config: &SearchConfig) -> Result<Self> {
        if !graph.contains(source) {
            return Err(PathError::NotANode(source));
        }
        let penalty = config.turn_penalty;
        let turns_matter = penalty > 0;

        let start = Label {
            pos: source,
            heading: config.start_heading.filter(|_| turns_matter),
        };

        let mut best: HashMap<Label, Cost> = HashMap::new();
        let mut parents: HashMap<Label, Vec<Label>> = HashMap::new();
        let mut visited: HashSet<(Label, Cost)> = HashSet::new();
        let mut open: BinaryHeap<Entry> = BinaryHeap::new();

        best.insert(start, 0);
        open.push(Entry {
            cost: 0,
            label: start,
        });

        let mut expanded = 0usize;
        let mut stopped_at: Option<Cost> = None;

        while let Some(Entry { cost, label }) = open.pop() {
            if !visited.insert((label, cost)) {
                continue;
            }
            if config.stop_at == Some(label.pos) {
                log::trace!("reached {} at cost {}, stopping early", label.pos, cost);
                stopped_at = Some(cost);
                break;
            }
            expanded += 1;

            for edge in graph.neighbors(label.pos) {
                let Some(out) = Direction::from_offset(edge.to - label.pos) else {
                    continue;
                };
                let mut weight = edge.weight;
                if label.heading.is_some_and(|h| h.is_turn_to(out)) {
                    weight += penalty;
                }
                let total = cost + weight;
                let next = Label {
                    pos: edge.to,
                    heading: turns_matter.then_some(out),
                };

                let known = best.get(&next).copied().unwrap_or(Cost::MAX);
                if total > known {
                    continue;
                }
                let preds = parents.entry(next).or_default();
                if total < known {
                    best.insert(next, total);
                    preds.clear();
                }
                if !preds.contains(&label) {
                    preds.push(label);
                }
                open.push(Entry { cost: total, label: next });
            }
        }

        // After an early stop only costs up to the stop cost are final.
        best.retain(|_, c| stopped_at.is_none_or(|limit| *c <= limit));
        parents.retain(|l, _| best.contains_key(l));

        let mut distances: HashMap<Point, Cost> = HashMap::new();
        for (label, &c) in &best {
            distances
                .entry(label.pos)
                .and_modify(|d| *d = (*d).min(c))
                .or_insert(c);
        }
        let mut optimal: HashMap<Point, Vec<Label>> = HashMap::new();
        for (label, &c) in &best {
            if distances.get(&label.pos) == Some(&c) {
                optimal.entry(label.pos).or_default().push(*label);
            }
        }

        log::debug!(
            "search from {}: expanded {} labels, reached {} of {} nodes",
            source,
            expanded,
            distances.len(),
            graph.len()
        );

        Ok(Self {
            source,
            distances: DistanceTable::from_map(distances),
            predecessors: PredecessorSet { parents, optimal },
        })
    }

    /// The node the search started from.
    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    /// Cost to reach `p`, or `None` if unreached.
    #[inline]
    pub fn distance(&self, p: Point) -> Option<Cost> {
        self.distances.get(p)
    }

    /// Cost to reach `p`, failing with [`PathError::Unreachable`] if no path
    /// exists.
    pub fn distance_to(&self, p: Point) -> Result<Cost> {
        self.distance(p).ok_or(PathError::Unreachable(p))
    }

    /// Whether `p` was reached.
    #[inline]
    pub fn reached(&self, p: Point) -> bool {
        self.distances.contains(p)
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn predecessors(&self) -> &PredecessorSet {
        &self.predecessors
    }

    /// Every node on at least one cost-minimal path from the source to
    /// `terminal`. Empty if `terminal` was not reached.
    pub fn nodes_on_any_shortest_path(&self, terminal: Point) -> HashSet<Point> {
        crate::reconstruct::nodes_on_any_shortest_path(&self.predecessors, self.source, terminal)
    }
}

/// Search from `source` with an explicit turn penalty, ignoring the one the
/// graph was built with.
pub fn shortest_paths(graph: &GridGraph, source: Point, turn_penalty: Cost) -> Result<ShortestPaths> {
    let config = SearchConfig {
        turn_penalty,
        ..SearchConfig::default()
    };
    ShortestPaths::compute_with(graph, source, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn open(c: char) -> bool {
        c != '#'
    }

    fn graph(rows: &[&str], penalty: Cost) -> GridGraph {
        GridGraph::from_rows(rows, open, penalty).unwrap()
    }

    #[test]
    fn source_has_zero_cost() {
        let g = graph(&["...", ".#.", "..."], 0);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        assert_eq!(sp.distance(Point::new(0, 0)), Some(0));
        assert_eq!(sp.source(), Point::new(0, 0));
        assert!(sp.predecessors().of(Point::new(0, 0)).is_empty());
    }

    #[test]
    fn open_three_by_three() {
        let g = graph(&["...", "...", "..."], 0);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        assert_eq!(sp.distance(Point::new(2, 2)), Some(4));
        assert_eq!(sp.distance(Point::new(1, 1)), Some(2));
        assert_eq!(sp.distances().len(), 9);
        let preds = sp.predecessors().of(Point::new(2, 2));
        assert_eq!(preds, HashSet::from([Point::new(1, 2), Point::new(2, 1)]));
    }

    #[test]
    fn wall_forces_detour() {
        let g = graph(&["..#..", "..#..", "....."], 0);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        // Straight-line Manhattan distance would be 4.
        assert_eq!(sp.distance(Point::new(4, 0)), Some(8));
    }

    #[test]
    fn unreachable_is_reported() {
        let g = graph(&["..#..", "..#..", "..#.."], 0);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        let far = Point::new(4, 2);
        assert_eq!(sp.distance(far), None);
        assert!(!sp.reached(far));
        assert_eq!(sp.distance_to(far), Err(PathError::Unreachable(far)));
        assert!(sp.nodes_on_any_shortest_path(far).is_empty());
    }

    #[test]
    fn wall_source_rejected() {
        let g = graph(&[".#."], 0);
        let err = ShortestPaths::compute(&g, Point::new(1, 0)).unwrap_err();
        assert_eq!(err, PathError::NotANode(Point::new(1, 0)));
        let err = ShortestPaths::compute(&g, Point::new(9, 9)).unwrap_err();
        assert_eq!(err, PathError::NotANode(Point::new(9, 9)));
    }

    #[test]
    fn straight_corridor_pays_no_turns() {
        let g = graph(&["......"], 1000);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        assert_eq!(sp.distance_to(Point::new(5, 0)), Ok(5));
    }

    #[test]
    fn l_corridor_pays_one_turn() {
        let g = graph(&["....", "###.", "###."], 1000);
        let sp = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        assert_eq!(sp.distance(Point::new(3, 0)), Some(3));
        assert_eq!(sp.distance(Point::new(3, 2)), Some(5 + 1000));
    }

    #[test]
    fn start_heading_charges_first_turn() {
        let g = graph(&["..", ".."], 1000);
        let facing_east = SearchConfig::for_graph(&g).with_start_heading(Direction::Right);
        let sp = ShortestPaths::compute_with(&g, Point::new(0, 1), &facing_east).unwrap();
        assert_eq!(sp.distance(Point::new(1, 1)), Some(1));
        assert_eq!(sp.distance(Point::new(0, 0)), Some(1001));
        // Right then up turns once; up then right would turn twice.
        assert_eq!(sp.distance(Point::new(1, 0)), Some(1002));
    }

    #[test]
    fn start_heading_ignored_without_penalty() {
        let g = graph(&["..", ".."], 0);
        let cfg = SearchConfig::default().with_start_heading(Direction::Right);
        let sp = ShortestPaths::compute_with(&g, Point::new(0, 1), &cfg).unwrap();
        assert_eq!(sp.distance(Point::new(0, 0)), Some(1));
    }

    #[test]
    fn crossroad_turns_are_charged() {
        // A plus-shaped junction: entering from the west and leaving north
        // is a turn, carrying on east is not.
        let g = graph(&["#.#", "...", "#.#"], 1000);
        let sp = ShortestPaths::compute(&g, Point::new(0, 1)).unwrap();
        assert_eq!(sp.distance(Point::new(2, 1)), Some(2));
        assert_eq!(sp.distance(Point::new(1, 0)), Some(1002));
        assert_eq!(sp.distance(Point::new(1, 2)), Some(1002));
    }

    #[test]
    fn explicit_penalty_overrides_graph() {
        let g = graph(&["....", "###.", "###."], 1000);
        let sp = shortest_paths(&g, Point::new(0, 0), 0).unwrap();
        assert_eq!(sp.distance(Point::new(3, 2)), Some(5));
        let sp = shortest_paths(&g, Point::new(0, 0), 7).unwrap();
        assert_eq!(sp.distance(Point::new(3, 2)), Some(12));
    }

    #[test]
    fn stop_at_target() {
        let g = graph(&[".....", ".....", "....."], 0);
        let target = Point::new(1, 0);
        let cfg = SearchConfig::for_graph(&g).with_stop_at(target);
        let sp = ShortestPaths::compute_with(&g, Point::new(0, 0), &cfg).unwrap();
        assert_eq!(sp.distance(target), Some(1));
        assert!(!sp.reached(Point::new(4, 2)));
        assert!(sp.distances().iter().all(|(_, c)| c <= 1));

        let full = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        for (p, c) in sp.distances().iter() {
            assert_eq!(full.distance(p), Some(c));
        }
    }

    #[test]
    fn repeated_search_is_identical() {
        let g = graph(&["...#.", ".#...", "...#."], 1000);
        let a = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        let b = ShortestPaths::compute(&g, Point::new(0, 0)).unwrap();
        assert_eq!(a.distances(), b.distances());
        for p in g.nodes() {
            assert_eq!(a.predecessors().of(p), b.predecessors().of(p));
        }
    }

    #[test]
    fn path_nodes_sorted_by_cost() {
        let g = graph(&["..."], 0);
        let sp = ShortestPaths::compute(&g, Point::new(1, 0)).unwrap();
        let nodes = sp.distances().to_path_nodes();
        assert_eq!(
            nodes,
            vec![
                PathNode { pos: Point::new(1, 0), cost: 0 },
                PathNode { pos: Point::new(0, 0), cost: 1 },
                PathNode { pos: Point::new(2, 0), cost: 1 },
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Brute force cross-check
    // -----------------------------------------------------------------------

    /// Cheapest cost to every node by exhaustive depth-first relaxation:
    /// a label is re-expanded whenever a strictly cheaper walk reaches it.
    fn brute_force(g: &GridGraph, source: Point, penalty: Cost) -> HashMap<Point, Cost> {
        let mut best: HashMap<Label, Cost> = HashMap::new();
        let start = Label {
            pos: source,
            heading: None,
        };
        let mut stack = vec![(start, 0)];
        while let Some((label, cost)) = stack.pop() {
            if best.get(&label).is_some_and(|&b| b <= cost) {
                continue;
            }
            best.insert(label, cost);
            for edge in g.neighbors(label.pos) {
                let dir = Direction::from_offset(edge.to - label.pos).unwrap();
                let turn = label.heading.is_some_and(|h| h.is_turn_to(dir));
                let w = edge.weight + if turn { penalty } else { 0 };
                let next = Label {
                    pos: edge.to,
                    heading: Some(dir),
                };
                stack.push((next, cost + w));
            }
        }

        let mut out: HashMap<Point, Cost> = HashMap::new();
        for (label, c) in best {
            let e = out.entry(label.pos).or_insert(c);
            *e = (*e).min(c);
        }
        out
    }

    fn random_rows(rng: &mut StdRng, w: usize, h: usize) -> Vec<String> {
        (0..h)
            .map(|_| {
                (0..w)
                    .map(|_| if rng.random_range(0..4) == 0 { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        let mut rng = StdRng::seed_from_u64(16);
        for round in 0..40 {
            let mut rows = random_rows(&mut rng, 4, 3);
            rows[0].replace_range(0..1, ".");
            let g = GridGraph::from_rows(&rows, open, 0).unwrap();
            let penalty = if round % 2 == 0 { 0 } else { 5 };
            let source = Point::new(0, 0);

            let sp = shortest_paths(&g, source, penalty).unwrap();
            let expected = brute_force(&g, source, penalty);
            assert_eq!(sp.distances().len(), expected.len(), "grid {rows:?}");
            for (p, c) in expected {
                assert_eq!(sp.distance(p), Some(c), "grid {rows:?} at {p}");
            }
        }
    }
}
