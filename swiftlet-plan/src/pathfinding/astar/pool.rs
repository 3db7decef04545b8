//! Preallocated cubic node pool.

use crate::core::GridIndex;
use crate::error::PlanError;

use super::types::{NodeRef, NodeState, SearchNode};

/// Fixed-capacity cube of search nodes, allocated once and reused by
/// every search through round stamping.
///
/// Storage is one contiguous `Vec` in x-major order.
#[derive(Clone, Debug)]
pub struct GridNodePool {
    nodes: Vec<SearchNode>,
    size: i32,
}

impl GridNodePool {
    /// Allocate a pool with `size` cells per axis.
    ///
    /// A pool needs at least one interior cell inside the reserved 1-cell
    /// border, so sizes below 3 are rejected along with non-positive ones.
    pub fn new(size: i64) -> Result<Self, PlanError> {
        if size <= 0 {
            return Err(PlanError::InvalidConfig(format!(
                "pool size must be positive, got {size}"
            )));
        }
        if size < 3 {
            return Err(PlanError::InvalidConfig(format!(
                "pool size {size} leaves no interior cells (minimum 3)"
            )));
        }
        let side = i32::try_from(size)
            .map_err(|_| PlanError::InvalidConfig(format!("pool size {size} is too large")))?;
        let len = (side as usize)
            .checked_mul(side as usize)
            .and_then(|n| n.checked_mul(side as usize))
            .ok_or_else(|| PlanError::InvalidConfig(format!("pool size {size} is too large")))?;

        let mut nodes = Vec::with_capacity(len);
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    nodes.push(SearchNode::new(GridIndex::new(x, y, z)));
                }
            }
        }

        Ok(Self { nodes, size: side })
    }

    /// Cells per axis
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the smallest pool holds 27 nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest and largest expandable index per axis
    #[inline]
    pub fn interior_bounds(&self) -> (i32, i32) {
        (1, self.size - 2)
    }

    /// True if `index` addresses a node (border cells included)
    #[inline]
    pub fn contains(&self, index: GridIndex) -> bool {
        index.within(0, self.size - 1)
    }

    /// True if `index` lies outside the reserved border
    #[inline]
    pub fn is_interior(&self, index: GridIndex) -> bool {
        let (lo, hi) = self.interior_bounds();
        index.within(lo, hi)
    }

    #[inline]
    fn flatten(&self, index: GridIndex) -> usize {
        let n = self.size as usize;
        (index.x as usize * n + index.y as usize) * n + index.z as usize
    }

    /// Checked lookup of a node handle
    pub fn node_ref(&self, index: GridIndex) -> Option<NodeRef> {
        self.contains(index).then(|| NodeRef(self.flatten(index)))
    }

    /// Mutable access by grid index.
    ///
    /// # Panics
    /// If any axis of `index` is outside `[0, size)`. Callers validate first.
    pub fn get_mut(&mut self, index: GridIndex) -> &mut SearchNode {
        assert!(
            self.contains(index),
            "grid index {index} outside pool of size {}",
            self.size
        );
        let flat = self.flatten(index);
        &mut self.nodes[flat]
    }

    /// Node behind a handle
    #[inline]
    pub fn node(&self, node: NodeRef) -> &SearchNode {
        &self.nodes[node.0]
    }

    /// Mutable node behind a handle
    #[inline]
    pub fn node_mut(&mut self, node: NodeRef) -> &mut SearchNode {
        &mut self.nodes[node.0]
    }

    /// Nodes written during `round`
    pub fn touched(&self, round: u64) -> impl Iterator<Item = &SearchNode> {
        self.nodes.iter().filter(move |n| n.round == round)
    }

    /// State of the node at `index` as seen from `round`
    pub fn state_in_round(&self, index: GridIndex, round: u64) -> NodeState {
        match self.node_ref(index) {
            Some(r) if self.node(r).round == round => self.node(r).state,
            _ => NodeState::Unvisited,
        }
    }
}
