//! Planner configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pathfinding::PlannerConfig;

use super::defaults;

/// A* planner settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Grid step in world units (usually the map resolution)
    #[serde(default = "defaults::step_size")]
    pub step_size: f64,

    /// Cells per axis of the preallocated node pool
    #[serde(default = "defaults::pool_size")]
    pub pool_size: i64,

    /// Goals farther than this are pulled toward the start
    #[serde(default = "defaults::sensing_range")]
    pub sensing_range: f64,

    /// Heuristic multiplier (>= 1.0)
    #[serde(default = "defaults::tie_breaker")]
    pub tie_breaker: f64,

    /// Searches slower than this log a warning (seconds)
    #[serde(default = "defaults::slow_search_warn_secs")]
    pub slow_search_warn_secs: f64,

    /// Merge collinear waypoints after reconstruction
    #[serde(default)]
    pub simplify_path: bool,

    /// Direction change below which a waypoint is dropped (radians)
    #[serde(default = "defaults::collinear_angle")]
    pub collinear_angle: f64,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            step_size: defaults::step_size(),
            pool_size: defaults::pool_size(),
            sensing_range: defaults::sensing_range(),
            tie_breaker: defaults::tie_breaker(),
            slow_search_warn_secs: defaults::slow_search_warn_secs(),
            simplify_path: false,
            collinear_angle: defaults::collinear_angle(),
        }
    }
}

impl PlannerSection {
    /// Convert to the runtime planner config
    pub fn to_planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            step_size: self.step_size,
            pool_size: self.pool_size,
            sensing_range: self.sensing_range,
            tie_breaker: self.tie_breaker,
            slow_search_warn: Duration::try_from_secs_f64(self.slow_search_warn_secs.max(0.0))
                .unwrap_or(Duration::MAX),
            simplify_path: self.simplify_path,
            collinear_angle: self.collinear_angle,
        }
    }
}
