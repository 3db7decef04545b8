//! Main SwiftletConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pathfinding::PlannerConfig;
use crate::replan::ReplanConfig;

use super::error::ConfigLoadError;
use super::navigation::NavigationSection;
use super::planner::PlannerSection;
use super::replan::ReplanSection;

/// Full swiftlet configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwiftletConfig {
    /// A* planner settings
    #[serde(default)]
    pub planner: PlannerSection,

    /// Replan trigger settings
    #[serde(default)]
    pub replan: ReplanSection,

    /// Control loop settings
    #[serde(default)]
    pub navigation: NavigationSection,
}

impl SwiftletConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Reject values the planner or loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_planner_config()
            .validate()
            .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;

        if !(self.replan.goal_tolerance >= 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "replan.goal_tolerance must be non-negative, got {}",
                self.replan.goal_tolerance
            )));
        }
        if !(self.navigation.loop_rate_hz > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "navigation.loop_rate_hz must be positive, got {}",
                self.navigation.loop_rate_hz
            )));
        }
        if !(self.navigation.cruise_speed > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "navigation.cruise_speed must be positive, got {}",
                self.navigation.cruise_speed
            )));
        }
        Ok(())
    }

    /// Convert to PlannerConfig for SearchContext
    pub fn to_planner_config(&self) -> PlannerConfig {
        self.planner.to_planner_config()
    }

    /// Convert to ReplanConfig for ReplanTrigger
    pub fn to_replan_config(&self) -> ReplanConfig {
        self.replan.to_replan_config()
    }
}
