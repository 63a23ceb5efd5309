use std::collections::{HashMap, VecDeque};

use gridwalk_core::Point;

use crate::error::{PathError, Result};
use crate::graph::{Cost, GridGraph};
use crate::search::DistanceTable;

/// Breadth-first step counts from `source`.
///
/// Every move costs 1 and turns are free, whatever penalty the graph was
/// built with. Gives the same distances as a zero-penalty
/// [`ShortestPaths`](crate::ShortestPaths) search without tracking
/// predecessors.
pub fn step_distances(graph: &GridGraph, source: Point) -> Result<DistanceTable> {
    if !graph.contains(source) {
        return Err(PathError::NotANode(source));
    }

    let mut steps: HashMap<Point, Cost> = HashMap::new();
    let mut queue: VecDeque<Point> = VecDeque::new();
    steps.insert(source, 0);
    queue.push_back(source);

    while let Some(cp) = queue.pop_front() {
        let current = steps[&cp];
        for edge in graph.neighbors(cp) {
            if steps.contains_key(&edge.to) {
                continue;
            }
            steps.insert(edge.to, current + 1);
            queue.push_back(edge.to);
        }
    }

    log::debug!("step distances from {}: reached {} nodes", source, steps.len());
    Ok(DistanceTable::from_map(steps))
}
