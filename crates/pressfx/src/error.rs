//! Error types

use pressfx_platform::PlatformError;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("Failed to parse press config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config file could not be read
    #[error("Failed to read press config: {0}")]
    Io(#[from] std::io::Error),

    /// Scale ratio outside [0, 1]
    #[error("Scale ratio must be within [0, 1], got {0}")]
    InvalidScaleRatio(f32),

    /// Negative or non-finite duration
    #[error("Invalid {name} duration: {value}ms")]
    InvalidDuration { name: &'static str, value: f32 },

    /// Easing curve with control points outside [0, 1]
    #[error("Invalid {name} easing curve: {points:?}")]
    InvalidEasing { name: &'static str, points: [f32; 4] },
}

/// Errors surfaced by the press animator
#[derive(Error, Debug)]
pub enum PressError {
    /// A host resource could not be resolved while building the overlay
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for press operations
pub type Result<T> = std::result::Result<T, PressError>;
