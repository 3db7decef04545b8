//! Path reconstruction from a finished search.

use crate::core::{GridIndex, WorldPoint};

use super::astar::{CoordinateIndexer, GridNodePool, NodeRef};

/// Parent chain of a goal node, start first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconstructedPath {
    /// Cell indices
    pub indices: Vec<GridIndex>,
    /// Cell centers in world coordinates
    pub waypoints: Vec<WorldPoint>,
}

/// Walk `goal`'s parent chain back to the start.
///
/// Every cell is reported, the goal included; no waypoints are merged.
/// The walk stops after `pool.len()` nodes so a corrupted chain cannot loop.
pub fn reconstruct(
    pool: &GridNodePool,
    indexer: &CoordinateIndexer,
    goal: NodeRef,
) -> ReconstructedPath {
    let mut indices = Vec::new();
    let mut current = Some(goal);

    while let Some(node_ref) = current {
        if indices.len() >= pool.len() {
            break;
        }
        let node = pool.node(node_ref);
        indices.push(node.index);
        current = node.parent;
    }
    indices.reverse();

    let waypoints = indices.iter().map(|&i| indexer.index_to_world(i)).collect();
    ReconstructedPath { indices, waypoints }
}

/// Calculate total path length
pub fn path_length(path: &[WorldPoint]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
