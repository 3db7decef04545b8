//! Collinear waypoint merging.

use crate::core::WorldPoint;

/// Drop interior waypoints that barely change direction.
///
/// A waypoint is removed when the direction from the last kept waypoint to
/// it and the direction from it to the next waypoint differ by less than
/// `max_angle` radians. The first and last waypoints are always kept.
pub fn simplify_collinear(path: &[WorldPoint], max_angle: f64) -> Vec<WorldPoint> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Vec::new();
    };
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut result = vec![first];
    for window in path.windows(2).skip(1) {
        let (curr, next) = (window[0], window[1]);
        let prev = result.last().copied().unwrap_or(first);

        let incoming = curr - prev;
        let outgoing = next - curr;
        if incoming.angle_between(&outgoing) >= max_angle {
            result.push(curr);
        }
    }
    result.push(last);
    result
}
