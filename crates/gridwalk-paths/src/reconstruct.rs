//! Recovering the tiles touched by every tied shortest path.

use std::collections::HashSet;

use gridwalk_core::Point;

use crate::search::{Label, PredecessorSet};

/// Every node lying on at least one cost-minimal path from `source` to
/// `terminal`, deduplicated.
///
/// Walks the predecessor links backwards from `terminal` with an explicit
/// stack, stopping each branch at `source`. Labels already expanded are
/// skipped, so malformed predecessor links cannot loop forever. Returns an
/// empty set if `terminal` was not reached.
pub fn nodes_on_any_shortest_path(
    predecessors: &PredecessorSet,
    source: Point,
    terminal: Point,
) -> HashSet<Point> {
    let mut nodes = HashSet::new();
    let Some(ends) = predecessors.optimal.get(&terminal) else {
        return nodes;
    };

    let mut seen: HashSet<Label> = HashSet::new();
    let mut stack: Vec<Label> = ends.clone();

    while let Some(label) = stack.pop() {
        if !seen.insert(label) {
            continue;
        }
        nodes.insert(label.pos);
        if label.pos == source {
            continue;
        }
        if let Some(parents) = predecessors.parents.get(&label) {
            stack.extend(parents.iter().filter(|p| !seen.contains(*p)));
        }
    }

    nodes
}
