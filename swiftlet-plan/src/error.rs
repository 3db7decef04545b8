//! Planner error types.
//!
//! Failures are grouped by when they can happen:
//! - [`PlanError::InvalidConfig`]: at construction, fatal
//! - [`InitError`]: while indexing the endpoints of one search
//! - [`SearchError`]: when the open set runs dry

use std::fmt;

use thiserror::Error;

use crate::core::WorldPoint;

/// Which end of the query failed to resolve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The vehicle position
    Start,
    /// The (possibly clamped) target
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Endpoint indexing or adjustment failure.
///
/// Per-call: the caller keeps its previous plan and retries on the next trigger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InitError {
    /// The endpoint sits in an obstacle and walking toward the other
    /// endpoint ran off the known map (or never found free space).
    #[error("{endpoint} point {position} could not be moved out of occupied space")]
    UnrecoverableEndpoint {
        /// Which endpoint failed
        endpoint: Endpoint,
        /// Last position tried
        position: WorldPoint,
    },
}

/// Open set exhausted without reaching the goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No connected free path under the current occupancy
    #[error("no path found after expanding {nodes_expanded} nodes")]
    Exhausted {
        /// Nodes closed before giving up
        nodes_expanded: usize,
    },
}

/// Any planner failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Rejected configuration, raised at startup
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint could not be resolved
    #[error("initialization failed: {0}")]
    Init(#[from] InitError),

    /// Search exhausted
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

impl PlanError {
    /// Short error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Init(_) => "INIT_ERR",
            Self::Search(_) => "SEARCH_ERR",
        }
    }

    /// Whether a later call may succeed without restarting.
    ///
    /// Init and search failures depend on the current occupancy and pose;
    /// configuration errors never go away on their own.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::from(InitError::UnrecoverableEndpoint {
            endpoint: Endpoint::Goal,
            position: WorldPoint::new(1.0, 2.0, 3.0),
        });
        assert_eq!(
            err.to_string(),
            "initialization failed: goal point (1.000, 2.000, 3.000) could not be moved out of occupied space"
        );

        let err = PlanError::from(SearchError::Exhausted { nodes_expanded: 42 });
        assert_eq!(
            err.to_string(),
            "search failed: no path found after expanding 42 nodes"
        );
    }

    #[test]
    fn test_error_code() {
        assert_eq!(PlanError::InvalidConfig("x".into()).code(), "INVALID_CONFIG");
        assert_eq!(
            PlanError::from(SearchError::Exhausted { nodes_expanded: 0 }).code(),
            "SEARCH_ERR"
        );
        assert!(!PlanError::InvalidConfig("x".into()).is_recoverable());
        assert!(PlanError::from(SearchError::Exhausted { nodes_expanded: 0 }).is_recoverable());
    }
}
