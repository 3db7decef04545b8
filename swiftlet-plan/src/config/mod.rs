//! Unified configuration loading for the swiftlet planner.
//!
//! Loads all configuration from a single YAML file. Every field has a
//! default, so an empty file (or no file at all) yields a usable setup.

mod defaults;
mod error;
mod navigation;
mod planner;
mod replan;
mod swiftlet;

// Re-export main types
pub use error::ConfigLoadError;
pub use swiftlet::SwiftletConfig;

// Re-export section types
pub use navigation::NavigationSection;
pub use planner::PlannerSection;
pub use replan::ReplanSection;
