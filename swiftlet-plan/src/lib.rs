//! # Swiftlet-Plan: Incremental 3D Grid A* Planner
//!
//! Collision-free path planning for an aerial vehicle through a discretized
//! occupancy volume, cheap enough to rerun whenever a new goal arrives.
//!
//! ## Features
//!
//! - **Reusable Node Pool**: one cubic allocation at startup, "cleared" in O(1)
//!   per search by round stamping
//! - **Recentered Volume**: the pool follows each query, so no global map
//!   is needed
//! - **26-Connected A\***: octile heuristic with tie breaking and lazy
//!   deletion in the open set
//! - **Endpoint Recovery**: occupied start/goal points are walked out of
//!   obstacles, distant goals are pulled into sensing range
//! - **Replan Trigger**: pending-goal state machine for a fixed-rate loop
//!
//! ## Quick Start
//!
//! ```rust
//! use swiftlet_plan::{PlannerConfig, SearchContext, WorldPoint};
//! use swiftlet_plan::occupancy::{ObstacleBox, VoxelMap};
//!
//! // 5m cube at 0.25m resolution with a pillar in the middle
//! let mut map = VoxelMap::new([21, 21, 21], 0.25, WorldPoint::ZERO);
//! map.fill_box(&ObstacleBox {
//!     min: WorldPoint::new(2.0, 2.0, 0.0),
//!     max: WorldPoint::new(3.0, 3.0, 5.0),
//! });
//!
//! let mut ctx = SearchContext::new(PlannerConfig::with_grid(0.25, 41)).unwrap();
//! let path = ctx
//!     .plan(&map, WorldPoint::new(1.0, 1.0, 1.0), WorldPoint::new(4.0, 4.0, 1.0))
//!     .unwrap();
//! println!("{} waypoints, {:.2}m", path.len(), path.cost);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: grid index and world point types
//! - [`occupancy`]: occupancy oracle trait and a dense voxel map
//! - [`pathfinding`]: node pool, indexer, A* search, reconstruction
//! - [`replan`]: pending-goal trigger
//! - [`config`]: YAML configuration
//! - [`error`]: error taxonomy

pub mod config;
pub mod core;
pub mod error;
pub mod occupancy;
pub mod pathfinding;
pub mod replan;

pub use config::{ConfigLoadError, SwiftletConfig};
pub use core::{GridIndex, WorldPoint};
pub use error::{Endpoint, InitError, PlanError, SearchError};
pub use occupancy::{Occupancy, OccupancyOracle};
pub use pathfinding::{
    NodeRef, NodeState, PlannedPath, PlannerConfig, SearchContext, SearchResult, SearchState,
    SearchStats, path_length,
};
pub use replan::{ReplanConfig, ReplanTrigger, TickOutcome};
