//! Shortest-path search over character grids.
//!
//! This crate turns a [`CharGrid`](gridwalk_core::CharGrid) into a graph of
//! passable cells and searches it:
//!
//! - **Graph construction** from a grid and a passability predicate
//!   ([`GridGraph::build`])
//! - **Dijkstra** single-source search with optional turn penalties that
//!   keeps *every* tied predecessor ([`ShortestPaths::compute`])
//! - **Reconstruction** of all nodes touched by any shortest path
//!   ([`nodes_on_any_shortest_path`])
//! - **BFS** step counts for uniform grids ([`step_distances`])
//! - **Shortcut** scanning over a distance table ([`shortcuts`])
//! - **Region** labelling by character ([`Regions::label`])
//!
//! Graphs are immutable once built and may be shared across threads; every
//! search owns its own queue and tables.

mod bfs;
mod error;
mod graph;
mod reconstruct;
mod regions;
mod search;
mod shortcuts;

pub use bfs::step_distances;
pub use error::{PathError, Result};
pub use graph::{Cost, Edge, GridGraph};
pub use reconstruct::nodes_on_any_shortest_path;
pub use regions::Regions;
pub use search::{
    DistanceTable, PathNode, PredecessorSet, SearchConfig, ShortestPaths, shortest_paths,
};
pub use shortcuts::{Shortcut, shortcuts};
