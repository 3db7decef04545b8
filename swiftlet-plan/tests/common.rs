//! Test utilities for swiftlet-plan.
//!
//! Provides occupancy fixtures and a brute-force shortest path reference.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use swiftlet_plan::occupancy::{ObstacleBox, Occupancy, OccupancyOracle, VoxelMap};
use swiftlet_plan::pathfinding::CoordinateIndexer;
use swiftlet_plan::{GridIndex, WorldPoint};

/// Everything free, everywhere.
pub fn open_space(_: WorldPoint) -> Occupancy {
    Occupancy::Free
}

/// 5x5x5 unit volume with a solid column at x=2, y=2.
pub fn column_world() -> VoxelMap {
    let mut map = VoxelMap::new([5, 5, 5], 1.0, WorldPoint::ZERO);
    map.fill_box(&ObstacleBox {
        min: WorldPoint::new(2.0, 2.0, 0.0),
        max: WorldPoint::new(2.0, 2.0, 4.0),
    });
    map
}

/// splitmix64 finalizer, used as a deterministic per-voxel coin.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Cube of `side` unit voxels centered on the origin with roughly
/// `density` of them occupied. The voxel at the origin is always free.
pub fn scattered_world(side: usize, density: f64, seed: u64) -> VoxelMap {
    let half = (side / 2) as f64;
    let mut map = VoxelMap::new([side; 3], 1.0, WorldPoint::new(-half, -half, -half));
    let threshold = (density.clamp(0.0, 1.0) * u32::MAX as f64) as u64;
    for i in 0..side {
        for j in 0..side {
            for k in 0..side {
                let key = seed ^ (((i as u64) << 40) | ((j as u64) << 20) | k as u64);
                if (mix(key) >> 32) < threshold {
                    map.set_occupied([i, j, k], true);
                }
            }
        }
    }
    map.set_occupied_at(WorldPoint::ZERO, false);
    map
}

#[derive(Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    index: GridIndex,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Exact 26-connected shortest distances (grid units) from `source` over
/// the interior of a pool of `size`, using `indexer` for world lookups.
pub fn dijkstra<O: OccupancyOracle + ?Sized>(
    oracle: &O,
    indexer: &CoordinateIndexer,
    size: i32,
    source: GridIndex,
) -> HashMap<GridIndex, f64> {
    let mut dist = HashMap::new();
    let mut heap = BinaryHeap::new();
    dist.insert(source, 0.0);
    heap.push(Frontier {
        cost: 0.0,
        index: source,
    });

    while let Some(Frontier { cost, index }) = heap.pop() {
        if cost > dist[&index] {
            continue;
        }
        for offset in GridIndex::neighbor_offsets() {
            let next = index + offset;
            if !next.within(1, size - 2) {
                continue;
            }
            if !oracle.query(indexer.index_to_world(next)).is_free() {
                continue;
            }
            let candidate = cost + offset.offset_length();
            if dist.get(&next).is_none_or(|&d| candidate < d) {
                dist.insert(next, candidate);
                heap.push(Frontier {
                    cost: candidate,
                    index: next,
                });
            }
        }
    }
    dist
}
