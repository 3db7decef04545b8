//! Replanning configuration section.

use serde::{Deserialize, Serialize};

use crate::replan::ReplanConfig;

use super::defaults;

/// Replan trigger settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplanSection {
    /// Distance at which the goal counts as reached (world units)
    #[serde(default = "defaults::goal_tolerance")]
    pub goal_tolerance: f64,

    /// Keep replanning every tick until the goal is reached
    #[serde(default)]
    pub replan_until_reached: bool,
}

impl Default for ReplanSection {
    fn default() -> Self {
        Self {
            goal_tolerance: defaults::goal_tolerance(),
            replan_until_reached: false,
        }
    }
}

impl ReplanSection {
    /// Convert to the runtime trigger config
    pub fn to_replan_config(&self) -> ReplanConfig {
        ReplanConfig {
            goal_tolerance: self.goal_tolerance,
            replan_until_reached: self.replan_until_reached,
        }
    }
}
