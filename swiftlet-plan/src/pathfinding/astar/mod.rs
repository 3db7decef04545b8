//! Incremental 3D A* search.
//!
//! Implements A* on a fixed cube of preallocated nodes with:
//! - Round stamping, so consecutive searches never clear the pool
//! - 26-connected moves with octile heuristic and tie breaking
//! - Per-query recentering and obstacle-aware endpoint adjustment
//! - Lazy deletion of superseded open-set entries

mod heuristic;
mod indexer;
mod pool;
mod search;
mod types;

pub use heuristic::{heuristic, octile_distance};
pub use indexer::{CoordinateIndexer, Endpoints, SENSING_CLAMP_FACTOR, clamp_to_sensing_range};
pub use pool::GridNodePool;
pub use search::SearchContext;
pub use types::{
    NodeRef, NodeState, PlannedPath, PlannerConfig, SearchNode, SearchResult, SearchState,
    SearchStats,
};

use crate::core::WorldPoint;
use crate::error::PlanError;
use crate::occupancy::OccupancyOracle;

/// One-shot planning with a freshly allocated context.
///
/// Allocates a whole pool; keep a [`SearchContext`] around for repeated queries.
pub fn find_path<O>(
    oracle: &O,
    config: PlannerConfig,
    start: WorldPoint,
    goal: WorldPoint,
) -> Result<PlannedPath, PlanError>
where
    O: OccupancyOracle + ?Sized,
{
    SearchContext::new(config)?.plan(oracle, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridIndex;
    use crate::error::{InitError, SearchError};
    use crate::occupancy::{ObstacleBox, Occupancy, VoxelMap};
    use approx::assert_relative_eq;

    fn open_space(_: WorldPoint) -> Occupancy {
        Occupancy::Free
    }

    fn unit_config(pool_size: i64) -> PlannerConfig {
        PlannerConfig::with_grid(1.0, pool_size)
    }

    #[test]
    fn test_straight_path() {
        let mut ctx = SearchContext::new(unit_config(21)).unwrap();
        let path = ctx
            .plan(&open_space, WorldPoint::ZERO, WorldPoint::new(6.0, 0.0, 0.0))
            .unwrap();

        assert_eq!(ctx.state(), SearchState::Succeeded);
        assert_eq!(path.len(), 7);
        assert_relative_eq!(path.cost_cells, 6.0);
        assert_relative_eq!(path.cost, 6.0);
        assert_relative_eq!(path.waypoints[0].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(path.waypoints[6].x, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pure_diagonal_path() {
        let mut ctx = SearchContext::new(unit_config(21)).unwrap();
        let path = ctx
            .plan(&open_space, WorldPoint::ZERO, WorldPoint::new(4.0, 4.0, 4.0))
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_relative_eq!(path.cost_cells, 4.0 * 3f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_start_equals_goal() {
        let mut ctx = SearchContext::new(unit_config(11)).unwrap();
        let p = WorldPoint::new(1.0, 2.0, 3.0);
        let path = ctx.plan(&open_space, p, p).unwrap();
        assert_eq!(path.len(), 1);
        assert_relative_eq!(path.cost, 0.0);
        assert_eq!(ctx.last_stats().nodes_expanded, 0);
    }

    #[test]
    fn test_world_cost_scales_with_step() {
        let mut ctx = SearchContext::new(PlannerConfig::with_grid(0.25, 41)).unwrap();
        let path = ctx
            .plan(&open_space, WorldPoint::ZERO, WorldPoint::new(2.0, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(path.cost_cells, 8.0, epsilon = 1e-9);
        assert_relative_eq!(path.cost, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_enclosed_goal_exhausts() {
        // Solid shell around the goal cell
        let mut map = VoxelMap::new([21, 21, 21], 1.0, WorldPoint::new(-10.0, -10.0, -10.0));
        map.fill_box(&ObstacleBox {
            min: WorldPoint::new(4.0, -2.0, -2.0),
            max: WorldPoint::new(8.0, 2.0, 2.0),
        });
        map.set_occupied_at(WorldPoint::new(6.0, 0.0, 0.0), false);

        let mut ctx = SearchContext::new(unit_config(21)).unwrap();
        let result = ctx.search(&map, 1.0, WorldPoint::ZERO, WorldPoint::new(6.0, 0.0, 0.0));

        assert!(matches!(
            result,
            SearchResult::SearchError(SearchError::Exhausted { .. })
        ));
        assert_eq!(ctx.state(), SearchState::SearchFailed);
        assert!(ctx.last_stats().nodes_expanded > 0);
    }

    #[test]
    fn test_init_failure_state() {
        let solid = |_: WorldPoint| Occupancy::Occupied;
        let mut ctx = SearchContext::new(unit_config(11)).unwrap();
        let p = WorldPoint::new(1.0, 1.0, 1.0);
        let result = ctx.search(&solid, 1.0, p, p);
        assert!(matches!(result, SearchResult::InitError(InitError::UnrecoverableEndpoint { .. })));
        assert_eq!(ctx.state(), SearchState::InitFailed);
        assert!(ctx.state().is_failed());
    }

    #[test]
    fn test_invalid_step_falls_back() {
        let mut ctx = SearchContext::new(unit_config(21)).unwrap();
        let result = ctx.search(&open_space, -1.0, WorldPoint::ZERO, WorldPoint::new(3.0, 0.0, 0.0));
        assert!(result.is_success());
        assert_relative_eq!(ctx.indexer().step(), 1.0);
    }

    #[test]
    fn test_idle_before_first_search() {
        let ctx = SearchContext::new(unit_config(5)).unwrap();
        assert_eq!(ctx.state(), SearchState::Idle);
        assert_eq!(ctx.round(), 0);
        assert_eq!(ctx.node_state(GridIndex::splat(2)), NodeState::Unvisited);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            SearchContext::new(unit_config(0)),
            Err(PlanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SearchContext>();
    }

    #[test]
    fn test_find_path() {
        let path = find_path(
            &open_space,
            unit_config(11),
            WorldPoint::ZERO,
            WorldPoint::new(0.0, 2.0, 2.0),
        )
        .unwrap();
        assert_eq!(path.len(), 3);
    }
}
