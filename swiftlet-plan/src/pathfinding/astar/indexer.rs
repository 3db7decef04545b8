//! World <-> pool index mapping, recentered for every search.

use log::debug;

use crate::core::{GridIndex, WorldPoint};
use crate::error::{Endpoint, InitError};
use crate::occupancy::{Occupancy, OccupancyOracle};

/// Fraction of the sensing range a clamped goal is placed at
pub const SENSING_CLAMP_FACTOR: f64 = 0.95;

/// Pull `goal` toward `start` if it lies beyond `sensing_range`.
///
/// Returns the effective goal and whether it was clamped.
pub fn clamp_to_sensing_range(
    start: WorldPoint,
    goal: WorldPoint,
    sensing_range: f64,
) -> (WorldPoint, bool) {
    let offset = goal - start;
    if offset.length() <= sensing_range {
        return (goal, false);
    }
    match offset.normalized() {
        Some(dir) => (start + dir * (sensing_range * SENSING_CLAMP_FACTOR), true),
        None => (goal, false),
    }
}

/// Resolved endpoints of one search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoints {
    /// Start cell
    pub start_index: GridIndex,
    /// Goal cell
    pub goal_index: GridIndex,
    /// Start after stepping out of obstacles
    pub start: WorldPoint,
    /// Goal after clamping and stepping out of obstacles
    pub goal: WorldPoint,
    /// Whether the goal was pulled in to the sensing range
    pub goal_clamped: bool,
    /// Grid steps taken to free the start
    pub start_steps: usize,
    /// Grid steps taken to free the goal
    pub goal_steps: usize,
}

/// Maps between world coordinates and pool indices.
///
/// The pool covers a cube of `size * step` world units centered on
/// `center`; [`setup`](Self::setup) moves that cube to the midpoint of
/// each query.
#[derive(Clone, Debug)]
pub struct CoordinateIndexer {
    size: i32,
    sensing_range: f64,
    step: f64,
    inv_step: f64,
    center: WorldPoint,
    center_index: GridIndex,
}

impl CoordinateIndexer {
    /// Create an indexer for a pool of `size` cells per axis
    pub fn new(size: i32, step: f64, sensing_range: f64) -> Self {
        Self {
            size,
            sensing_range,
            step,
            inv_step: 1.0 / step,
            center: WorldPoint::ZERO,
            center_index: GridIndex::splat(size / 2),
        }
    }

    /// Grid step in world units
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// World position of the center cell
    #[inline]
    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Pool midpoint index
    #[inline]
    pub fn center_index(&self) -> GridIndex {
        self.center_index
    }

    /// Configured sensing range
    #[inline]
    pub fn sensing_range(&self) -> f64 {
        self.sensing_range
    }

    /// Change the grid step
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
        self.inv_step = 1.0 / step;
    }

    /// Re-center the pool on `center`
    pub fn recenter(&mut self, center: WorldPoint) {
        self.center = center;
        self.center_index = GridIndex::splat(self.size / 2);
    }

    /// Nearest cell to a world position, each axis clamped into the interior
    pub fn world_to_index(&self, position: WorldPoint) -> GridIndex {
        let rel = (position - self.center) * self.inv_step;
        let axis = |v: f64| {
            // Saturating cast, NaN maps to 0
            v.round() as i32
        };
        let raw = GridIndex::new(axis(rel.x), axis(rel.y), axis(rel.z));
        GridIndex::new(
            raw.x.saturating_add(self.center_index.x),
            raw.y.saturating_add(self.center_index.y),
            raw.z.saturating_add(self.center_index.z),
        )
        .clamp(1, self.size - 2)
    }

    /// Center of a cell in world coordinates
    pub fn index_to_world(&self, index: GridIndex) -> WorldPoint {
        let rel = index - self.center_index;
        WorldPoint::new(rel.x as f64, rel.y as f64, rel.z as f64) * self.step + self.center
    }

    /// Prepare the indexer for one search.
    ///
    /// Clamps the goal to the sensing range, recenters on the midpoint,
    /// then walks an occupied start (and afterwards an occupied goal) one
    /// step at a time toward the other endpoint until its cell is free.
    pub fn setup<O>(
        &mut self,
        oracle: &O,
        step: f64,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> Result<Endpoints, InitError>
    where
        O: OccupancyOracle + ?Sized,
    {
        self.set_step(step);

        let (goal, goal_clamped) = clamp_to_sensing_range(start, goal, self.sensing_range);
        if goal_clamped {
            debug!(
                "[Indexer] Goal beyond sensing range {:.2}, clamped to {}",
                self.sensing_range, goal
            );
        }
        self.recenter(start.midpoint(&goal));

        let (start_index, start, start_steps) =
            self.adjust_endpoint(oracle, Endpoint::Start, start, goal)?;
        let (goal_index, goal, goal_steps) =
            self.adjust_endpoint(oracle, Endpoint::Goal, goal, start)?;

        Ok(Endpoints {
            start_index,
            goal_index,
            start,
            goal,
            goal_clamped,
            start_steps,
            goal_steps,
        })
    }

    /// Step `point` toward `toward` until its cell queries free.
    ///
    /// Gives up when a cell is out of bounds, when there is no direction to
    /// step in, or after `size` steps.
    fn adjust_endpoint<O>(
        &self,
        oracle: &O,
        endpoint: Endpoint,
        point: WorldPoint,
        toward: WorldPoint,
    ) -> Result<(GridIndex, WorldPoint, usize), InitError>
    where
        O: OccupancyOracle + ?Sized,
    {
        let fail = |position| InitError::UnrecoverableEndpoint { endpoint, position };

        let mut position = point;
        let mut index = self.world_to_index(position);
        for steps in 0..=self.size.max(0) as usize {
            match oracle.query(self.index_to_world(index)) {
                Occupancy::Free => {
                    if steps > 0 {
                        debug!(
                            "[Indexer] {} moved {} steps out of obstacle to {}",
                            endpoint, steps, position
                        );
                    }
                    return Ok((index, position, steps));
                }
                Occupancy::OutOfBounds => {
                    debug!("[Indexer] FAILED: {} reached unknown space at {}", endpoint, position);
                    return Err(fail(position));
                }
                Occupancy::Occupied => {}
            }

            let Some(dir) = (toward - position).normalized() else {
                debug!("[Indexer] FAILED: {} occupied with no direction to step", endpoint);
                return Err(fail(position));
            };
            position = position + dir * self.step;
            index = self.world_to_index(position);
        }

        debug!("[Indexer] FAILED: {} still occupied after {} steps", endpoint, self.size);
        Err(fail(position))
    }
}
