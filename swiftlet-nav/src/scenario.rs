//! YAML scenario files for the simulated pose/goal feed.
//!
//! ```yaml
//! name: "pillars"
//! world:
//!   min: {x: -5.0, y: -5.0, z: 0.0}
//!   max: {x: 5.0, y: 5.0, z: 3.0}
//!   resolution: 0.1
//! obstacles:
//!   - {min: {x: -0.5, y: -0.5, z: 0.0}, max: {x: 0.5, y: 0.5, z: 3.0}}
//! start: {x: -4.0, y: 0.0, z: 1.0}
//! goals:
//!   - {x: 4.0, y: 0.0, z: 1.0}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use swiftlet_plan::WorldPoint;
use swiftlet_plan::occupancy::{ObstacleBox, VoxelMap};

use crate::error::{NavError, Result};

/// Top-level scenario loaded from YAML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name (used in logs and output)
    #[serde(default = "default_name")]
    pub name: String,
    /// Extent of the known volume
    pub world: WorldBounds,
    /// Occupied boxes
    #[serde(default)]
    pub obstacles: Vec<ObstacleBox>,
    /// Initial vehicle position
    pub start: WorldPoint,
    /// Goals, delivered one at a time as each is reached
    pub goals: Vec<WorldPoint>,
}

/// Known volume, everything outside is out of bounds
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Minimum corner
    pub min: WorldPoint,
    /// Maximum corner
    pub max: WorldPoint,
    /// Voxel edge length
    pub resolution: f64,
}

fn default_name() -> String {
    "scenario".to_string()
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a scenario
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        let w = &self.world;
        if !(w.resolution > 0.0) {
            return Err(NavError::Scenario(format!(
                "world.resolution must be positive, got {}",
                w.resolution
            )));
        }
        if w.max.x < w.min.x || w.max.y < w.min.y || w.max.z < w.min.z {
            return Err(NavError::Scenario(format!(
                "world.max {} is below world.min {}",
                w.max, w.min
            )));
        }
        if !self.start.is_finite() || self.goals.iter().any(|g| !g.is_finite()) {
            return Err(NavError::Scenario("non-finite start or goal".to_string()));
        }
        if self.goals.is_empty() {
            return Err(NavError::Scenario("no goals given".to_string()));
        }
        Ok(())
    }

    /// Build the voxel occupancy volume
    pub fn build_map(&self) -> VoxelMap {
        let mut map = VoxelMap::from_bounds(self.world.min, self.world.max, self.world.resolution);
        for obstacle in &self.obstacles {
            map.fill_box(obstacle);
        }
        map
    }
}
