//! Error types for SwiftletNav

use swiftlet_plan::{ConfigLoadError, PlanError};
use thiserror::Error;

/// SwiftletNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Planner error: {0}")]
    Planner(#[from] PlanError),
}

impl From<serde_yaml::Error> for NavError {
    fn from(e: serde_yaml::Error) -> Self {
        NavError::Scenario(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavError::from(ConfigLoadError::Invalid("pool size".into()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value: pool size"
        );

        let err = NavError::from(PlanError::InvalidConfig("step".into()));
        assert_eq!(
            err.to_string(),
            "Planner error: invalid configuration: step"
        );
    }
}
