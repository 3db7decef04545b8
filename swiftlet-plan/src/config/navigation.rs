//! Navigation loop configuration section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Control loop settings used by the navigation binary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigationSection {
    /// Trigger polling rate (Hz)
    #[serde(default = "defaults::loop_rate_hz")]
    pub loop_rate_hz: f64,

    /// Simulated vehicle speed along the current plan (world units/s)
    #[serde(default = "defaults::cruise_speed")]
    pub cruise_speed: f64,

    /// Stop after this many loop iterations
    #[serde(default = "defaults::max_ticks")]
    pub max_ticks: u64,

    /// Where to write the plan log (none = don't write)
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            loop_rate_hz: defaults::loop_rate_hz(),
            cruise_speed: defaults::cruise_speed(),
            max_ticks: defaults::max_ticks(),
            output: None,
        }
    }
}
