//! A* search types.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{GridIndex, WorldPoint};
use crate::error::{InitError, PlanError, SearchError};

use super::indexer::SENSING_CLAMP_FACTOR;

/// Non-owning handle to a node in the pool (flattened index)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

impl NodeRef {
    /// Flattened position in the pool
    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }
}

/// Per-round node state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeState {
    /// Not touched this round, or touched and found occupied
    #[default]
    Unvisited,
    /// In the open set
    Open,
    /// Expanded
    Closed,
}

/// A node in the preallocated search volume.
///
/// Everything except `index` is only meaningful while `round` equals the
/// owning context's current round.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Position in the pool, written once at allocation
    pub index: GridIndex,
    /// Predecessor on the best known path
    pub parent: Option<NodeRef>,
    /// Open/closed bookkeeping
    pub state: NodeState,
    /// Cost from start (grid units)
    pub cost_so_far: f64,
    /// cost_so_far + heuristic
    pub estimated_total_cost: f64,
    /// Search round that last wrote this node
    pub round: u64,
}

impl SearchNode {
    pub(super) fn new(index: GridIndex) -> Self {
        Self {
            index,
            parent: None,
            state: NodeState::Unvisited,
            cost_so_far: f64::INFINITY,
            estimated_total_cost: f64::INFINITY,
            round: 0,
        }
    }

    /// Claim the node for `round`, discarding whatever an older round left.
    #[inline]
    pub(super) fn stamp(&mut self, round: u64) {
        if self.round != round {
            self.round = round;
            self.parent = None;
            self.state = NodeState::Unvisited;
            self.cost_so_far = f64::INFINITY;
            self.estimated_total_cost = f64::INFINITY;
        }
    }
}

/// Entry in the open set. Several entries may refer to one node; only
/// the cheapest matters, the rest are dropped when popped after it closes.
#[derive(Clone, Copy, Debug)]
pub(super) struct OpenEntry {
    pub node: NodeRef,
    pub f_cost: f64,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.f_cost == other.f_cost
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle of one search invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search has run yet
    #[default]
    Idle,
    /// Resolving endpoints
    Initializing,
    /// Open set being processed
    Expanding,
    /// Goal reached
    Succeeded,
    /// Endpoint could not be resolved
    InitFailed,
    /// Open set exhausted
    SearchFailed,
}

impl SearchState {
    /// True for the two failure states
    pub fn is_failed(self) -> bool {
        matches!(self, SearchState::InitFailed | SearchState::SearchFailed)
    }
}

/// Counters for one search round
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Round number the counters belong to
    pub round: u64,
    /// Nodes closed
    pub nodes_expanded: usize,
    /// Entries pushed onto the open set (start included)
    pub nodes_pushed: usize,
    /// Popped entries discarded because their node was already closed
    pub stale_pops: usize,
    /// Wall time of the whole search
    pub elapsed: Duration,
    /// Wall time spent resolving endpoints
    pub adjust_elapsed: Duration,
}

/// Outcome of [`SearchContext::search`](super::SearchContext::search)
#[derive(Clone, Debug, PartialEq)]
pub enum SearchResult {
    /// Goal node reached; walk its parents for the path
    Success(NodeRef),
    /// Endpoint setup failed
    InitError(InitError),
    /// Open set exhausted
    SearchError(SearchError),
}

impl SearchResult {
    /// Whether the goal was reached
    pub fn is_success(&self) -> bool {
        matches!(self, SearchResult::Success(_))
    }

    /// Convert to a `Result` for `?` propagation
    pub fn into_result(self) -> Result<NodeRef, PlanError> {
        match self {
            SearchResult::Success(node) => Ok(node),
            SearchResult::InitError(e) => Err(e.into()),
            SearchResult::SearchError(e) => Err(e.into()),
        }
    }
}

impl From<SearchResult> for Result<NodeRef, PlanError> {
    fn from(result: SearchResult) -> Self {
        result.into_result()
    }
}

/// A reconstructed plan, start first
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedPath {
    /// World-frame waypoints (cell centers), start to goal
    pub waypoints: Vec<WorldPoint>,
    /// Pool indices of the unsimplified path
    pub indices: Vec<GridIndex>,
    /// Path cost in world units
    pub cost: f64,
    /// Path cost in grid units (`cost_so_far` of the goal node)
    pub cost_cells: f64,
    /// Goal actually searched for after clamping and adjustment
    pub effective_goal: WorldPoint,
    /// Whether the goal was pulled in to the sensing range
    pub goal_clamped: bool,
    /// Counters from the search that produced this plan
    pub stats: SearchStats,
}

impl PlannedPath {
    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// True if there are no waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// First waypoint
    pub fn start(&self) -> Option<WorldPoint> {
        self.waypoints.first().copied()
    }

    /// Last waypoint
    pub fn goal(&self) -> Option<WorldPoint> {
        self.waypoints.last().copied()
    }
}

impl fmt::Display for PlannedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} waypoints, cost {:.3} ({:.3} cells), {} expanded",
            self.waypoints.len(),
            self.cost,
            self.cost_cells,
            self.stats.nodes_expanded
        )
    }
}

/// Runtime planner configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Grid step in world units
    pub step_size: f64,
    /// Cells per axis of the node pool
    pub pool_size: i64,
    /// Maximum start-goal distance before the goal is pulled in
    pub sensing_range: f64,
    /// Heuristic multiplier
    pub tie_breaker: f64,
    /// Searches slower than this log a warning
    pub slow_search_warn: Duration,
    /// Run collinear simplification on reconstructed paths
    pub simplify_path: bool,
    /// Direction change below which a waypoint is dropped (radians)
    pub collinear_angle: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            pool_size: 100,
            sensing_range: 10.0,
            tie_breaker: 1.0001,
            slow_search_warn: Duration::from_millis(100),
            simplify_path: false,
            collinear_angle: 0.05,
        }
    }
}

impl PlannerConfig {
    /// Create with a custom step and pool size
    pub fn with_grid(step_size: f64, pool_size: i64) -> Self {
        Self {
            step_size,
            pool_size,
            ..Default::default()
        }
    }

    /// Override the sensing range
    pub fn with_sensing_range(mut self, range: f64) -> Self {
        self.sensing_range = range;
        self
    }

    /// Enable collinear simplification with the given angle
    pub fn with_simplification(mut self, collinear_angle: f64) -> Self {
        self.simplify_path = true;
        self.collinear_angle = collinear_angle;
        self
    }

    /// World distance from the pool center to the last interior cell
    pub fn pool_reach(&self) -> f64 {
        (self.pool_size / 2 - 1).max(0) as f64 * self.step_size
    }

    /// Whether a start and a sensing-clamped goal both fit inside the pool.
    ///
    /// The pool is centered on their midpoint, so each endpoint sits up to
    /// half the clamped distance away. Endpoints beyond the reach are
    /// clamped to the pool border.
    pub fn covers_sensing_range(&self) -> bool {
        self.pool_reach() >= self.sensing_range * SENSING_CLAMP_FACTOR / 2.0
    }

    /// Check every value the search depends on
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.pool_size <= 0 {
            return Err(PlanError::InvalidConfig(format!(
                "pool size must be positive, got {}",
                self.pool_size
            )));
        }
        if self.pool_size < 3 {
            return Err(PlanError::InvalidConfig(format!(
                "pool size {} leaves no interior cells (minimum 3)",
                self.pool_size
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "step size must be positive, got {}",
                self.step_size
            )));
        }
        if !(self.sensing_range.is_finite() && self.sensing_range > 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "sensing range must be positive, got {}",
                self.sensing_range
            )));
        }
        if !(self.tie_breaker.is_finite() && self.tie_breaker >= 1.0) {
            return Err(PlanError::InvalidConfig(format!(
                "tie breaker must be at least 1.0, got {}",
                self.tie_breaker
            )));
        }
        if !(self.collinear_angle >= 0.0) {
            return Err(PlanError::InvalidConfig(format!(
                "collinear angle must be non-negative, got {}",
                self.collinear_angle
            )));
        }
        Ok(())
    }
}
