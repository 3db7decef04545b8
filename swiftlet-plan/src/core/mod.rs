//! Core types for the swiftlet planner.
//!
//! - [`GridIndex`]: integer cell index into the search volume
//! - [`WorldPoint`]: continuous position in the map frame

mod point;

pub use point::{GridIndex, WorldPoint};
