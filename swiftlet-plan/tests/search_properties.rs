//! Behavioral properties of the incremental A* search.

mod common;

use approx::assert_relative_eq;
use common::{dijkstra, open_space, scattered_world};
use swiftlet_plan::occupancy::{Occupancy, OccupancyOracle};
use swiftlet_plan::pathfinding::astar::{SENSING_CLAMP_FACTOR, octile_distance};
use swiftlet_plan::pathfinding::{CoordinateIndexer, path_length};
use swiftlet_plan::{
    GridIndex, NodeState, PlanError, PlannerConfig, SearchContext, SearchResult, WorldPoint,
};

fn unit_context(pool_size: i64) -> SearchContext {
    SearchContext::new(PlannerConfig::with_grid(1.0, pool_size)).unwrap()
}

#[test]
fn heuristic_never_overestimates() {
    let map = scattered_world(15, 0.2, 7);
    let mut indexer = CoordinateIndexer::new(15, 1.0, 10.0);
    indexer.recenter(WorldPoint::ZERO);

    let source = indexer.world_to_index(WorldPoint::ZERO);
    let dist = dijkstra(&map, &indexer, 15, source);
    assert!(dist.len() > 100);

    for (&index, &true_cost) in &dist {
        let h = octile_distance(source, index);
        assert!(
            h <= true_cost + 1e-9,
            "h({index}) = {h} exceeds true cost {true_cost}"
        );
    }
}

#[test]
fn path_length_matches_goal_cost() {
    let map = scattered_world(21, 0.15, 11);
    let mut ctx = unit_context(21);
    let goals = [
        WorldPoint::new(6.0, 4.0, -2.0),
        WorldPoint::new(-5.0, 7.0, 3.0),
        WorldPoint::new(0.0, -8.0, 8.0),
    ];

    let mut successes = 0;
    for goal in goals {
        let Ok(path) = ctx.plan(&map, WorldPoint::ZERO, goal) else {
            continue;
        };
        successes += 1;
        let summed = path_length(&path.waypoints) / ctx.indexer().step();
        assert_relative_eq!(summed, path.cost_cells, epsilon = 1e-9);
        assert_eq!(path.indices.len(), path.waypoints.len());
    }
    assert!(successes > 0);
}

#[test]
fn search_is_optimal_without_tie_breaking() {
    let map = scattered_world(21, 0.2, 3);
    let config = PlannerConfig {
        tie_breaker: 1.0,
        ..PlannerConfig::with_grid(1.0, 21)
    };
    let mut ctx = SearchContext::new(config).unwrap();
    let goal = WorldPoint::new(6.0, -6.0, 4.0);

    let result = ctx.search(&map, 1.0, WorldPoint::ZERO, goal);
    let Some(ends) = ctx.endpoints().copied() else {
        return;
    };
    let SearchResult::Success(goal_ref) = result else {
        // Blocked under this seed; the brute force must agree
        let dist = dijkstra(&map, ctx.indexer(), 21, ends.start_index);
        assert!(!dist.contains_key(&ends.goal_index));
        return;
    };

    let dist = dijkstra(&map, ctx.indexer(), 21, ends.start_index);
    let found = ctx.node(goal_ref).unwrap().cost_so_far;
    assert_relative_eq!(found, dist[&ends.goal_index], epsilon = 1e-9);
}

#[test]
fn improved_open_nodes_leave_stale_entries() {
    let config = PlannerConfig {
        tie_breaker: 1.0,
        ..PlannerConfig::with_grid(1.0, 17)
    };
    let mut ctx = SearchContext::new(config).unwrap();
    let goal = WorldPoint::new(6.0, 0.0, 0.0);

    let mut stale = 0;
    for seed in [2, 13, 29] {
        let map = scattered_world(17, 0.25, seed);
        // Hollow shell around the goal: the search has to drain the open set
        let sealed = |p: WorldPoint| {
            let d = p - goal;
            let r = d.x.abs().max(d.y.abs()).max(d.z.abs());
            if r < 0.5 {
                Occupancy::Free
            } else if r < 1.5 {
                Occupancy::Occupied
            } else {
                map.query(p)
            }
        };

        let result = ctx.search(&sealed, 1.0, WorldPoint::ZERO, goal);
        assert!(matches!(result, SearchResult::SearchError(_)));
        let stats = ctx.last_stats();
        assert_eq!(
            stats.nodes_pushed,
            stats.nodes_expanded + stats.stale_pops,
            "every pushed entry is either expanded or dropped"
        );
        stale += stats.stale_pops;

        // Same map without the shell: the improved costs are still exact
        let SearchResult::Success(goal_ref) = ctx.search(&map, 1.0, WorldPoint::ZERO, goal) else {
            continue;
        };
        let ends = *ctx.endpoints().unwrap();
        let dist = dijkstra(&map, ctx.indexer(), 17, ends.start_index);
        let found = ctx.node(goal_ref).unwrap().cost_so_far;
        assert_relative_eq!(found, dist[&ends.goal_index], epsilon = 1e-9);
    }
    assert!(stale > 0);
}

#[test]
fn tie_breaking_stays_near_optimal() {
    let map = scattered_world(21, 0.2, 5);
    let mut ctx = unit_context(21);
    let Ok(path) = ctx.plan(&map, WorldPoint::ZERO, WorldPoint::new(-7.0, 5.0, 6.0)) else {
        return;
    };
    let ends = *ctx.endpoints().unwrap();
    let dist = dijkstra(&map, ctx.indexer(), 21, ends.start_index);
    let optimal = dist[&ends.goal_index];
    assert!(path.cost_cells >= optimal - 1e-9);
    assert!(path.cost_cells <= optimal * 1.0001 + 1e-9);
}

#[test]
fn rounds_are_isolated() {
    let mut ctx = unit_context(21);
    ctx.plan(&open_space, WorldPoint::ZERO, WorldPoint::new(8.0, 6.0, 4.0))
        .unwrap();
    let first_round = ctx.round();
    let touched: Vec<GridIndex> = ctx
        .pool()
        .touched(first_round)
        .map(|n| n.index)
        .collect();
    let closed_before = touched
        .iter()
        .filter(|&&i| ctx.node_state(i) == NodeState::Closed)
        .count();
    assert!(closed_before > 0);

    // Second round only touches its start cell
    let p = WorldPoint::new(30.0, 30.0, 30.0);
    ctx.plan(&open_space, p, p).unwrap();
    assert_eq!(ctx.round(), first_round + 1);
    assert_eq!(ctx.pool().touched(ctx.round()).count(), 1);

    for index in touched {
        let node_ref = ctx.pool().node_ref(index).unwrap();
        if ctx.pool().node(node_ref).round == ctx.round() {
            continue;
        }
        assert_eq!(ctx.node_state(index), NodeState::Unvisited);
        assert!(ctx.node(node_ref).is_none());
    }
}

#[test]
fn repeated_queries_reuse_pool() {
    let map = scattered_world(21, 0.1, 21);
    let mut ctx = unit_context(21);
    let goal = WorldPoint::new(5.0, 5.0, -5.0);

    let first = ctx.plan(&map, WorldPoint::ZERO, goal);
    // A failing round in between must not disturb the next one
    let solid = |_: WorldPoint| Occupancy::Occupied;
    assert!(matches!(
        ctx.plan(&solid, WorldPoint::ZERO, goal),
        Err(PlanError::Init(_))
    ));
    let second = ctx.plan(&map, WorldPoint::ZERO, goal);

    match (first, second) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a.indices, b.indices);
            assert_relative_eq!(a.cost, b.cost);
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("mismatched results: {a:?} vs {b:?}"),
    }
}

#[test]
fn index_world_round_trip() {
    for (step, center) in [
        (1.0, WorldPoint::ZERO),
        (0.1, WorldPoint::new(12.34, -5.6, 2.2)),
        (0.3, WorldPoint::new(-0.15, 0.15, 100.0)),
    ] {
        let mut indexer = CoordinateIndexer::new(31, step, 10.0);
        indexer.recenter(center);
        for x in 1..30 {
            for y in (1..30).step_by(7) {
                for z in (1..30).step_by(4) {
                    let idx = GridIndex::new(x, y, z);
                    assert_eq!(indexer.world_to_index(indexer.index_to_world(idx)), idx);
                }
            }
        }
    }
}

#[test]
fn waypoints_avoid_obstacles() {
    let map = scattered_world(21, 0.25, 99);
    let mut ctx = unit_context(21);
    let goals = [
        WorldPoint::new(7.0, 0.0, 0.0),
        WorldPoint::new(-6.0, -6.0, 2.0),
        WorldPoint::new(3.0, 8.0, -7.0),
        WorldPoint::new(-2.0, 4.0, 9.0),
    ];

    for goal in goals {
        if let Ok(path) = ctx.plan(&map, WorldPoint::ZERO, goal) {
            for wp in &path.waypoints {
                assert_eq!(map.query(*wp), Occupancy::Free, "waypoint {wp} not free");
            }
        }
    }
}

#[test]
fn distant_goal_is_clamped_to_sensing_range() {
    let config = PlannerConfig::with_grid(0.5, 41).with_sensing_range(10.0);
    let mut ctx = SearchContext::new(config).unwrap();
    let start = WorldPoint::new(1.0, 2.0, 3.0);
    let goal = WorldPoint::new(31.0, 42.0, 3.0);

    let path = ctx.plan(&open_space, start, goal).unwrap();
    assert!(path.goal_clamped);
    assert_relative_eq!(
        path.effective_goal.distance(&start),
        10.0 * SENSING_CLAMP_FACTOR,
        epsilon = 1e-9
    );

    let bearing = (goal - start).normalized().unwrap();
    let clamped = (path.effective_goal - start).normalized().unwrap();
    assert_relative_eq!(bearing.angle_between(&clamped), 0.0, epsilon = 1e-9);
}

#[test]
fn expansion_stays_inside_border() {
    // Enclosed goal forces the search to flood the whole pool
    let shell = |p: WorldPoint| {
        let d = p - WorldPoint::new(4.0, 0.0, 0.0);
        let r = d.x.abs().max(d.y.abs()).max(d.z.abs());
        if (0.5..2.5).contains(&r) {
            Occupancy::Occupied
        } else {
            Occupancy::Free
        }
    };
    let mut ctx = unit_context(15);
    let result = ctx.search(&shell, 1.0, WorldPoint::ZERO, WorldPoint::new(4.0, 0.0, 0.0));
    assert!(matches!(result, SearchResult::SearchError(_)));

    let pool = ctx.pool();
    let touched: Vec<_> = pool.touched(ctx.round()).collect();
    assert!(touched.len() > 500);
    assert!(touched.iter().all(|n| pool.is_interior(n.index)));
    for n in &touched {
        assert!(n.index.within(1, pool.size() - 2));
    }
}
