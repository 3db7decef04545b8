//! Configuration loading errors.

use thiserror::Error;

/// Error loading or validating a configuration file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// YAML did not parse into the expected sections
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsed values are out of range
    #[error("Invalid value: {0}")]
    Invalid(String),
}
