//! Dense voxel occupancy volume.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

use super::{Occupancy, OccupancyOracle};

/// Axis-aligned box of occupied space (inclusive corners, world units)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBox {
    /// Minimum corner
    pub min: WorldPoint,
    /// Maximum corner
    pub max: WorldPoint,
}

/// Dense occupancy volume stored in one flat array.
///
/// Voxel `(i, j, k)` is centered at `origin + (i, j, k) * resolution`, so a
/// query rounds to the nearest voxel center. Positions that round outside
/// the volume report [`Occupancy::OutOfBounds`].
#[derive(Clone, Debug)]
pub struct VoxelMap {
    occupied: Vec<bool>,
    dims: [usize; 3],
    resolution: f64,
    inv_resolution: f64,
    origin: WorldPoint,
}

impl VoxelMap {
    /// Create an all-free volume.
    ///
    /// `origin` is the center of voxel `(0, 0, 0)`.
    pub fn new(dims: [usize; 3], resolution: f64, origin: WorldPoint) -> Self {
        Self {
            occupied: vec![false; dims[0] * dims[1] * dims[2]],
            dims,
            resolution,
            inv_resolution: 1.0 / resolution,
            origin,
        }
    }

    /// Create an all-free volume covering `[min, max]` (inclusive).
    pub fn from_bounds(min: WorldPoint, max: WorldPoint, resolution: f64) -> Self {
        let extent = max - min;
        let cells = |len: f64| ((len / resolution).round().max(0.0) as usize) + 1;
        Self::new(
            [cells(extent.x), cells(extent.y), cells(extent.z)],
            resolution,
            min,
        )
    }

    /// Volume dimensions in voxels
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Edge length of one voxel
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Center of voxel `(0, 0, 0)`
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    #[inline]
    fn flat(&self, v: [usize; 3]) -> usize {
        (v[0] * self.dims[1] + v[1]) * self.dims[2] + v[2]
    }

    /// Voxel containing a world position, if inside the volume
    pub fn voxel_of(&self, position: WorldPoint) -> Option<[usize; 3]> {
        let rel = (position - self.origin) * self.inv_resolution;
        let axes = [rel.x, rel.y, rel.z];
        let mut voxel = [0usize; 3];
        for (axis, value) in axes.iter().enumerate() {
            let i = value.round();
            if !i.is_finite() || i < 0.0 || i >= self.dims[axis] as f64 {
                return None;
            }
            voxel[axis] = i as usize;
        }
        Some(voxel)
    }

    /// Center of a voxel in world coordinates
    pub fn voxel_center(&self, voxel: [usize; 3]) -> WorldPoint {
        self.origin
            + WorldPoint::new(voxel[0] as f64, voxel[1] as f64, voxel[2] as f64) * self.resolution
    }

    /// Mark one voxel. Returns false if the voxel is outside the volume.
    pub fn set_occupied(&mut self, voxel: [usize; 3], occupied: bool) -> bool {
        if voxel.iter().zip(self.dims.iter()).any(|(v, d)| v >= d) {
            return false;
        }
        let idx = self.flat(voxel);
        self.occupied[idx] = occupied;
        true
    }

    /// Mark the voxel containing a world position
    pub fn set_occupied_at(&mut self, position: WorldPoint, occupied: bool) -> bool {
        match self.voxel_of(position) {
            Some(v) => self.set_occupied(v, occupied),
            None => false,
        }
    }

    /// Mark every voxel whose center lies inside the box.
    ///
    /// Returns the number of voxels marked.
    pub fn fill_box(&mut self, obstacle: &ObstacleBox) -> usize {
        let lo = (obstacle.min - self.origin) * self.inv_resolution;
        let hi = (obstacle.max - self.origin) * self.inv_resolution;
        let range = |lo: f64, hi: f64, dim: usize| {
            let start = lo.ceil().max(0.0) as usize;
            let end = (hi.floor() + 1.0).clamp(0.0, dim as f64) as usize;
            start..end
        };

        let mut count = 0;
        for i in range(lo.x, hi.x, self.dims[0]) {
            for j in range(lo.y, hi.y, self.dims[1]) {
                for k in range(lo.z, hi.z, self.dims[2]) {
                    let idx = self.flat([i, j, k]);
                    self.occupied[idx] = true;
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of occupied voxels
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

impl OccupancyOracle for VoxelMap {
    fn query(&self, position: WorldPoint) -> Occupancy {
        match self.voxel_of(position) {
            Some(v) if self.occupied[self.flat(v)] => Occupancy::Occupied,
            Some(_) => Occupancy::Free,
            None => Occupancy::OutOfBounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_bounds() {
        let map = VoxelMap::new([5, 5, 5], 1.0, WorldPoint::ZERO);
        assert_eq!(map.query(WorldPoint::new(4.0, 4.0, 4.0)), Occupancy::Free);
        assert_eq!(map.query(WorldPoint::new(4.4, 0.0, 0.0)), Occupancy::Free);
        assert_eq!(
            map.query(WorldPoint::new(4.6, 0.0, 0.0)),
            Occupancy::OutOfBounds
        );
        assert_eq!(
            map.query(WorldPoint::new(-0.6, 0.0, 0.0)),
            Occupancy::OutOfBounds
        );
    }

    #[test]
    fn test_fill_box_column() {
        let mut map = VoxelMap::new([5, 5, 5], 1.0, WorldPoint::ZERO);
        let column = ObstacleBox {
            min: WorldPoint::new(2.0, 2.0, 0.0),
            max: WorldPoint::new(2.0, 2.0, 4.0),
        };
        assert_eq!(map.fill_box(&column), 5);
        assert_eq!(map.occupied_count(), 5);
        for z in 0..5 {
            assert_eq!(
                map.query(WorldPoint::new(2.0, 2.0, z as f64)),
                Occupancy::Occupied
            );
        }
        assert_eq!(map.query(WorldPoint::new(2.0, 1.0, 2.0)), Occupancy::Free);
    }

    #[test]
    fn test_from_bounds() {
        let map = VoxelMap::from_bounds(
            WorldPoint::new(-1.0, -1.0, 0.0),
            WorldPoint::new(1.0, 1.0, 1.0),
            0.5,
        );
        assert_eq!(map.dims(), [5, 5, 3]);
        assert_eq!(
            map.voxel_center([4, 4, 2]),
            WorldPoint::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_set_occupied_out_of_range() {
        let mut map = VoxelMap::new([2, 2, 2], 1.0, WorldPoint::ZERO);
        assert!(!map.set_occupied([2, 0, 0], true));
        assert!(map.set_occupied_at(WorldPoint::new(1.0, 1.0, 1.0), true));
        assert_eq!(map.occupied_count(), 1);
    }
}
