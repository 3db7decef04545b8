//! Occupancy queries consumed by the planner.
//!
//! The planner never builds or mutates a map. It only asks an
//! [`OccupancyOracle`] whether a world position is free. Any inflated map
//! implementation can sit behind the trait; [`VoxelMap`] is a dense in-memory
//! volume used by tests, benchmarks and the simulator.
//!
//! ```rust
//! use swiftlet_plan::occupancy::{Occupancy, OccupancyOracle};
//! use swiftlet_plan::WorldPoint;
//!
//! // Any closure works as an oracle
//! let floor = |p: WorldPoint| {
//!     if p.z < 0.0 { Occupancy::Occupied } else { Occupancy::Free }
//! };
//! assert_eq!(floor.query(WorldPoint::new(0.0, 0.0, 1.0)), Occupancy::Free);
//! ```

mod voxel;

pub use voxel::{ObstacleBox, VoxelMap};

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

/// Answer to an occupancy query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    /// Traversable
    Free,
    /// Blocked (after inflation, if the map inflates)
    Occupied,
    /// Outside the region the map knows about
    OutOfBounds,
}

impl Occupancy {
    /// Only `Free` is traversable; out-of-bounds counts as blocked.
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, Occupancy::Free)
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            Occupancy::Free => '.',
            Occupancy::Occupied => '#',
            Occupancy::OutOfBounds => '?',
        }
    }
}

/// Source of free/occupied/out-of-bounds answers for world positions.
pub trait OccupancyOracle {
    /// Classify a world position
    fn query(&self, position: WorldPoint) -> Occupancy;
}

impl<F> OccupancyOracle for F
where
    F: Fn(WorldPoint) -> Occupancy,
{
    #[inline]
    fn query(&self, position: WorldPoint) -> Occupancy {
        self(position)
    }
}
