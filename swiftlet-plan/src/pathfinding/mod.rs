//! Path planning on the recentered search volume.
//!
//! - **A\* Search**: incremental 26-connected search over a reusable pool
//! - **Reconstruction**: parent chain to world-frame waypoints
//! - **Simplification**: optional collinear waypoint merging
//!
//! ```rust
//! use swiftlet_plan::pathfinding::{PlannerConfig, SearchContext};
//! use swiftlet_plan::occupancy::Occupancy;
//! use swiftlet_plan::WorldPoint;
//!
//! let mut ctx = SearchContext::new(PlannerConfig::with_grid(0.5, 41)).unwrap();
//! let open = |_: WorldPoint| Occupancy::Free;
//!
//! let path = ctx.plan(&open, WorldPoint::ZERO, WorldPoint::new(3.0, 1.0, 0.5)).unwrap();
//! assert!(path.len() >= 2);
//! ```

pub mod astar;
pub mod path;
pub mod simplify;

pub use astar::{
    CoordinateIndexer, Endpoints, GridNodePool, NodeRef, NodeState, PlannedPath, PlannerConfig,
    SearchContext, SearchNode, SearchResult, SearchState, SearchStats, find_path,
};

pub use path::{ReconstructedPath, path_length, reconstruct};
pub use simplify::simplify_collinear;
