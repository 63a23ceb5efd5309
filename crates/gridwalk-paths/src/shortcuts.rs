//! Shortcut scanning over a distance table.
//!
//! On a single racetrack every reached node has a step count from the start.
//! Jumping from `from` straight to `to` (ignoring walls) costs their
//! Manhattan distance, and saves whatever the track would have spent beyond
//! that.

use gridwalk_core::Point;

use crate::graph::Cost;
use crate::search::DistanceTable;

/// A jump between two reached nodes that beats following the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortcut {
    pub from: Point,
    pub to: Point,
    /// Cost saved compared to following the distance table.
    pub saving: Cost,
}

/// All shortcuts of Manhattan length at most `max_jump` that save at least
/// `min_saving`, sorted by origin then destination.
///
/// `min_saving` of 0 is treated as 1, so only jumps that actually save
/// something are reported.
pub fn shortcuts(table: &DistanceTable, max_jump: i32, min_saving: Cost) -> Vec<Shortcut> {
    let min_saving = min_saving.max(1);
    let mut found = Vec::new();

    for (from, start) in table.iter() {
        for dy in -max_jump..=max_jump {
            let reach = max_jump - dy.abs();
            for dx in -reach..=reach {
                let to = from.shift(dx, dy);
                let Some(end) = table.get(to) else {
                    continue;
                };
                let jump = from.manhattan(to) as Cost;
                if end.saturating_sub(start) < jump.saturating_add(min_saving) {
                    continue;
                }
                found.push(Shortcut {
                    from,
                    to,
                    saving: end - start - jump,
                });
            }
        }
    }

    found.sort_by(|a, b| a.from.cmp(&b.from).then(a.to.cmp(&b.to)));
    found
}
