//! Octile distance heuristic for 26-connected grids.

use std::f64::consts::SQRT_2;

use crate::core::GridIndex;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Exact 26-connected distance on an empty grid (grid units).
///
/// Moves along the shared diagonal of all three axes first, then the
/// diagonal of the remaining two, then straight.
pub fn octile_distance(a: GridIndex, b: GridIndex) -> f64 {
    let (dx, dy, dz) = a.abs_diff(&b);
    let diag = dx.min(dy).min(dz);
    let (dx, dy, dz) = (dx - diag, dy - diag, dz - diag);

    // One of the reduced differences is now zero
    let (p, q) = if dx == 0 {
        (dy, dz)
    } else if dy == 0 {
        (dx, dz)
    } else {
        (dx, dy)
    };

    SQRT_3 * diag as f64 + SQRT_2 * p.min(q) as f64 + p.abs_diff(q) as f64
}

/// Search heuristic: octile distance scaled by the tie breaker
#[inline]
pub fn heuristic(a: GridIndex, b: GridIndex, tie_breaker: f64) -> f64 {
    tie_breaker * octile_distance(a, b)
}
