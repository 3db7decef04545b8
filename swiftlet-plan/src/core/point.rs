//! Point and index types for the search volume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Discrete index into the node pool (one cell per axis step)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridIndex {
    /// X index
    pub x: i32,
    /// Y index
    pub y: i32,
    /// Z index
    pub z: i32,
}

impl GridIndex {
    /// Create a new grid index
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Per-axis absolute difference to another index
    #[inline]
    pub fn abs_diff(&self, other: &GridIndex) -> (u32, u32, u32) {
        (
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        )
    }

    /// Chebyshev distance (max axis difference)
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridIndex) -> u32 {
        let (dx, dy, dz) = self.abs_diff(other);
        dx.max(dy).max(dz)
    }

    /// Clamp every axis independently into `[lo, hi]`
    #[inline]
    pub fn clamp(self, lo: i32, hi: i32) -> GridIndex {
        GridIndex::new(self.x.clamp(lo, hi), self.y.clamp(lo, hi), self.z.clamp(lo, hi))
    }

    /// True if every axis lies in `[lo, hi]`
    #[inline]
    pub fn within(&self, lo: i32, hi: i32) -> bool {
        (lo..=hi).contains(&self.x) && (lo..=hi).contains(&self.y) && (lo..=hi).contains(&self.z)
    }

    /// The 26 offsets of a 3D Moore neighborhood.
    ///
    /// Ordered x-major, y, then z, matching a nested `-1..=1` loop.
    pub fn neighbor_offsets() -> [GridIndex; 26] {
        let mut offsets = [GridIndex::default(); 26];
        let mut n = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    offsets[n] = GridIndex::new(dx, dy, dz);
                    n += 1;
                }
            }
        }
        offsets
    }

    /// Euclidean length of this index treated as an offset
    #[inline]
    pub fn offset_length(&self) -> f64 {
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        (x * x + y * y + z * z).sqrt()
    }
}

impl Add for GridIndex {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridIndex::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for GridIndex {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridIndex::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// World coordinates (map frame units, usually meters)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate (north in the NWU frame)
    pub x: f64,
    /// Y coordinate (west in the NWU frame)
    pub y: f64,
    /// Z coordinate (up)
    pub z: f64,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f64 {
        (*self - *other).length()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f64 {
        let d = *self - *other;
        d.dot(&d)
    }

    /// Length of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero vector
    #[inline]
    pub fn normalized(&self) -> Option<WorldPoint> {
        let len = self.length();
        if len > f64::EPSILON {
            Some(*self / len)
        } else {
            None
        }
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &WorldPoint) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Midpoint between this point and another
    #[inline]
    pub fn midpoint(&self, other: &WorldPoint) -> WorldPoint {
        (*self + *other) / 2.0
    }

    /// Angle between two direction vectors (radians, `[0, π]`)
    pub fn angle_between(&self, other: &WorldPoint) -> f64 {
        let denom = self.length() * other.length();
        if denom <= f64::EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// True if all components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f64> for WorldPoint {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f64) -> Self {
        WorldPoint::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl From<[f64; 3]> for WorldPoint {
    fn from(v: [f64; 3]) -> Self {
        WorldPoint::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
