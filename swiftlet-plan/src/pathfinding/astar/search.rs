//! Incremental A* search over the reusable node pool.

use std::collections::BinaryHeap;
use std::time::Instant;

use log::{debug, trace, warn};

use crate::core::{GridIndex, WorldPoint};
use crate::error::{Endpoint, InitError, PlanError, SearchError};
use crate::occupancy::OccupancyOracle;
use crate::pathfinding::path;
use crate::pathfinding::simplify::simplify_collinear;

use super::heuristic::heuristic;
use super::indexer::{CoordinateIndexer, Endpoints};
use super::pool::GridNodePool;
use super::types::{
    NodeRef, NodeState, OpenEntry, PlannedPath, PlannerConfig, SearchNode, SearchResult,
    SearchState, SearchStats,
};

/// Owned state of the planner: node pool, round counter, open set and
/// indexer. Allocate once at startup and call [`search`](Self::search) or
/// [`plan`](Self::plan) for every query.
#[derive(Debug)]
pub struct SearchContext {
    config: PlannerConfig,
    pool: GridNodePool,
    indexer: CoordinateIndexer,
    open: BinaryHeap<OpenEntry>,
    offsets: [GridIndex; 26],
    round: u64,
    state: SearchState,
    endpoints: Option<Endpoints>,
    stats: SearchStats,
}

impl SearchContext {
    /// Validate `config` and allocate the node pool
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        config.validate()?;
        let pool = GridNodePool::new(config.pool_size)?;
        let indexer = CoordinateIndexer::new(pool.size(), config.step_size, config.sensing_range);

        debug!(
            "[AStar] Allocated pool {}^3 ({} nodes), step {:.3}",
            pool.size(),
            pool.len(),
            config.step_size
        );

        Ok(Self {
            config,
            pool,
            indexer,
            open: BinaryHeap::new(),
            offsets: GridIndex::neighbor_offsets(),
            round: 0,
            state: SearchState::Idle,
            endpoints: None,
            stats: SearchStats::default(),
        })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, PlanError> {
        Self::new(PlannerConfig::default())
    }

    /// Configuration in use
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// State of the most recent search
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Current round (0 before the first search)
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Counters from the most recent search
    pub fn last_stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Endpoints resolved by the most recent search
    pub fn endpoints(&self) -> Option<&Endpoints> {
        self.endpoints.as_ref()
    }

    /// Node pool (read-only)
    pub fn pool(&self) -> &GridNodePool {
        &self.pool
    }

    /// Coordinate mapping of the most recent search
    pub fn indexer(&self) -> &CoordinateIndexer {
        &self.indexer
    }

    /// Node behind a handle, only if written during the current round
    pub fn node(&self, node: NodeRef) -> Option<&SearchNode> {
        let n = self.pool.node(node);
        (n.round == self.round).then_some(n)
    }

    /// Logical state of a cell in the current round
    pub fn node_state(&self, index: GridIndex) -> NodeState {
        self.pool.state_in_round(index, self.round)
    }

    /// Run one search from `start` to `goal` with grid step `step_size`.
    ///
    /// A non-positive or non-finite step falls back to the configured one.
    pub fn search<O>(
        &mut self,
        oracle: &O,
        step_size: f64,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> SearchResult
    where
        O: OccupancyOracle + ?Sized,
    {
        let started = Instant::now();
        self.round += 1;
        self.open.clear();
        self.endpoints = None;
        self.stats = SearchStats {
            round: self.round,
            ..Default::default()
        };

        let step = if step_size.is_finite() && step_size > 0.0 {
            step_size
        } else {
            warn!(
                "[AStar] Invalid step size {}, using configured {}",
                step_size, self.config.step_size
            );
            self.config.step_size
        };

        trace!("[AStar] Round {}: {} -> {} (step {:.3})", self.round, start, goal, step);

        self.state = SearchState::Initializing;
        let endpoints = match self.indexer.setup(oracle, step, start, goal) {
            Ok(e) => e,
            Err(e) => {
                debug!("[AStar] FAILED: {}", e);
                self.state = SearchState::InitFailed;
                self.finish(started);
                return SearchResult::InitError(e);
            }
        };
        self.stats.adjust_elapsed = started.elapsed();
        self.endpoints = Some(endpoints);

        let goal_index = endpoints.goal_index;
        let tie_breaker = self.config.tie_breaker;
        let round = self.round;

        let Some(start_ref) = self.pool.node_ref(endpoints.start_index) else {
            let e = InitError::UnrecoverableEndpoint {
                endpoint: Endpoint::Start,
                position: endpoints.start,
            };
            self.state = SearchState::InitFailed;
            self.finish(started);
            return SearchResult::InitError(e);
        };
        let start_node = self.pool.node_mut(start_ref);
        start_node.stamp(round);
        start_node.cost_so_far = 0.0;
        start_node.estimated_total_cost = heuristic(endpoints.start_index, goal_index, tie_breaker);
        start_node.parent = None;
        start_node.state = NodeState::Open;
        let f_cost = start_node.estimated_total_cost;
        self.open.push(OpenEntry {
            node: start_ref,
            f_cost,
        });
        self.stats.nodes_pushed = 1;

        self.state = SearchState::Expanding;
        let (lo, hi) = self.pool.interior_bounds();

        while let Some(entry) = self.open.pop() {
            let (state, current_index, current_cost) = {
                let n = self.pool.node(entry.node);
                (n.state, n.index, n.cost_so_far)
            };
            if state == NodeState::Closed {
                self.stats.stale_pops += 1;
                continue;
            }

            if current_index == goal_index {
                self.state = SearchState::Succeeded;
                self.finish(started);
                debug!(
                    "[AStar] SUCCESS: cost {:.3} cells, {} expanded, {} pushed, {:.2}ms",
                    current_cost,
                    self.stats.nodes_expanded,
                    self.stats.nodes_pushed,
                    self.stats.elapsed.as_secs_f64() * 1000.0
                );
                return SearchResult::Success(entry.node);
            }

            self.pool.node_mut(entry.node).state = NodeState::Closed;
            self.stats.nodes_expanded += 1;

            for offset in &self.offsets {
                let neighbor_index = current_index + *offset;
                if !neighbor_index.within(lo, hi) {
                    continue;
                }

                let Some(neighbor_ref) = self.pool.node_ref(neighbor_index) else {
                    continue;
                };
                let neighbor = self.pool.node_mut(neighbor_ref);
                neighbor.stamp(round);
                if neighbor.state == NodeState::Closed {
                    continue;
                }

                let world = self.indexer.index_to_world(neighbor_index);
                if !oracle.query(world).is_free() {
                    continue;
                }

                let tentative = current_cost + offset.offset_length();
                let improves = match neighbor.state {
                    NodeState::Unvisited => true,
                    NodeState::Open => tentative < neighbor.cost_so_far,
                    NodeState::Closed => false,
                };
                if !improves {
                    continue;
                }

                neighbor.cost_so_far = tentative;
                neighbor.estimated_total_cost =
                    tentative + heuristic(neighbor_index, goal_index, tie_breaker);
                neighbor.parent = Some(entry.node);
                neighbor.state = NodeState::Open;
                let f_cost = neighbor.estimated_total_cost;

                self.open.push(OpenEntry {
                    node: neighbor_ref,
                    f_cost,
                });
                self.stats.nodes_pushed += 1;
            }
        }

        self.state = SearchState::SearchFailed;
        self.finish(started);
        debug!(
            "[AStar] FAILED: open set exhausted after {} expansions",
            self.stats.nodes_expanded
        );
        SearchResult::SearchError(SearchError::Exhausted {
            nodes_expanded: self.stats.nodes_expanded,
        })
    }

    /// Search with the configured step and reconstruct the path.
    ///
    /// Applies collinear simplification when enabled in the config.
    pub fn plan<O>(
        &mut self,
        oracle: &O,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> Result<PlannedPath, PlanError>
    where
        O: OccupancyOracle + ?Sized,
    {
        let step = self.config.step_size;
        let goal_ref = self.search(oracle, step, start, goal).into_result()?;

        let reconstructed = path::reconstruct(&self.pool, &self.indexer, goal_ref);
        let cost_cells = self.pool.node(goal_ref).cost_so_far;
        let waypoints = if self.config.simplify_path {
            simplify_collinear(&reconstructed.waypoints, self.config.collinear_angle)
        } else {
            reconstructed.waypoints
        };

        let (effective_goal, goal_clamped) = self
            .endpoints
            .map(|e| (e.goal, e.goal_clamped))
            .unwrap_or((goal, false));

        Ok(PlannedPath {
            waypoints,
            indices: reconstructed.indices,
            cost: cost_cells * self.indexer.step(),
            cost_cells,
            effective_goal,
            goal_clamped,
            stats: self.stats,
        })
    }

    /// World-frame waypoints from the start to `goal`
    pub fn reconstruct(&self, goal: NodeRef) -> Vec<WorldPoint> {
        path::reconstruct(&self.pool, &self.indexer, goal).waypoints
    }

    fn finish(&mut self, started: Instant) {
        self.stats.elapsed = started.elapsed();
        if self.stats.elapsed > self.config.slow_search_warn {
            warn!(
                "[AStar] Slow search: {:.3}s (round {}, {} expanded, state {:?})",
                self.stats.elapsed.as_secs_f64(),
                self.round,
                self.stats.nodes_expanded,
                self.state
            );
        }
    }
}
