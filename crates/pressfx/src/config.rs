//! Press effect configuration
//!
//! [`PressConfig`] carries every tunable of the effect. Build it fluently:
//!
//! ```
//! use pressfx::{Dimension, PressConfig, PressVariant};
//!
//! let config = PressConfig::new()
//!     .variant(PressVariant::Delayed)
//!     .scale_ratio(0.9)
//!     .uniform_corner_radius(Dimension::Px(12.0))
//!     .haptics(false);
//! assert_eq!(config.scale_ratio, 0.9);
//! ```
//!
//! or load it from TOML:
//!
//! ```toml
//! variant = "delayed"
//! scale_ratio = 0.9
//! mask_color = { argb = 0x33000000 }
//!
//! [corner_radius]
//! top_left = { px = 12.0 }
//! top_right = { resource = 2131099648 }
//! ```

use std::fs;
use std::path::Path;

use pressfx_animation::EasingCurve;
use pressfx_platform::{Color, DrawableHandle, ResourceId};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scale applied to the target at the bottom of a press
pub const DEFAULT_SCALE_RATIO: f32 = 0.65;
/// Default mask color (31% black)
pub const DEFAULT_MASK_COLOR: Color = Color::from_argb_hex(0x4F00_0000);
/// Default corner radius of the generated mask
pub const DEFAULT_CORNER_RADIUS_PX: f32 = 8.0;
pub const DOWN_DURATION_MS: f32 = 200.0;
pub const UP_DURATION_MS: f32 = 200.0;
/// How long a finger must rest on the view before the delayed variant presses
pub const PRESS_DELAY_MS: f32 = 150.0;
pub const HAPTIC_DURATION_MS: u64 = 100;
pub const HAPTIC_AMPLITUDE: u8 = 255;

/// Which touch state machine drives the effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressVariant {
    /// Press immediately on touch-down
    #[default]
    Normal,
    /// Press only once the touch has rested long enough, so scrolls passing
    /// over the view do not trigger it
    Delayed,
}

/// A length given directly or by resource
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Px(f32),
    Resource(ResourceId),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Px(DEFAULT_CORNER_RADIUS_PX)
    }
}

/// A color given directly or by resource
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRef {
    Argb(Color),
    Resource(ResourceId),
}

impl Default for ColorRef {
    fn default() -> Self {
        ColorRef::Argb(DEFAULT_MASK_COLOR)
    }
}

/// Corner radii of the generated rounded-rectangle mask
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    pub top_left: Dimension,
    pub top_right: Dimension,
    pub bottom_left: Dimension,
    pub bottom_right: Dimension,
}

impl CornerConfig {
    pub fn uniform(radius: Dimension) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }
}

/// Press effect configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    pub variant: PressVariant,
    /// Target scale at the bottom of the press; 1.0 disables shrinking
    pub scale_ratio: f32,
    pub corner_radius: CornerConfig,
    pub mask_color: ColorRef,
    /// Drawable resource used as the mask instead of a generated shape
    pub mask_drawable: Option<ResourceId>,
    /// Host drawable used as the mask; wins over everything else
    pub foreground_drawable: Option<DrawableHandle>,
    /// Generate an oval mask instead of a rounded rectangle
    pub circular: bool,
    pub haptics: bool,
    /// Install and fade the darkening foreground
    pub foreground: bool,
    pub down_duration_ms: f32,
    pub up_duration_ms: f32,
    pub down_curve: EasingCurve,
    pub up_curve: EasingCurve,
    pub press_delay_ms: f32,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            variant: PressVariant::Normal,
            scale_ratio: DEFAULT_SCALE_RATIO,
            corner_radius: CornerConfig::default(),
            mask_color: ColorRef::default(),
            mask_drawable: None,
            foreground_drawable: None,
            circular: false,
            haptics: true,
            foreground: true,
            down_duration_ms: DOWN_DURATION_MS,
            up_duration_ms: UP_DURATION_MS,
            down_curve: EasingCurve::STANDARD,
            up_curve: EasingCurve::STANDARD,
            press_delay_ms: PRESS_DELAY_MS,
        }
    }
}

impl PressConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: PressConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.scale_ratio) {
            return Err(ConfigError::InvalidScaleRatio(self.scale_ratio));
        }
        for (name, value) in [
            ("down", self.down_duration_ms),
            ("up", self.up_duration_ms),
            ("press delay", self.press_delay_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        for (name, curve) in [("down", self.down_curve), ("up", self.up_curve)] {
            if !curve.is_valid() {
                return Err(ConfigError::InvalidEasing {
                    name,
                    points: curve.to_array(),
                });
            }
        }
        Ok(())
    }

    /// Select the touch state machine
    pub fn variant(mut self, variant: PressVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the press scale, clamped to [0, 1]
    pub fn scale_ratio(mut self, scale_ratio: f32) -> Self {
        self.scale_ratio = if scale_ratio.is_nan() {
            DEFAULT_SCALE_RATIO
        } else {
            scale_ratio.clamp(0.0, 1.0)
        };
        self
    }

    /// Set each corner radius of the generated mask
    pub fn corner_radius(
        mut self,
        top_left: Dimension,
        top_right: Dimension,
        bottom_left: Dimension,
        bottom_right: Dimension,
    ) -> Self {
        self.corner_radius = CornerConfig {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        };
        self
    }

    /// Set all corner radii of the generated mask
    pub fn uniform_corner_radius(mut self, radius: Dimension) -> Self {
        self.corner_radius = CornerConfig::uniform(radius);
        self
    }

    /// Set the fill color of the generated mask
    pub fn mask_color(mut self, color: ColorRef) -> Self {
        self.mask_color = color;
        self
    }

    /// Use a drawable resource as the mask
    pub fn mask_drawable(mut self, resource: ResourceId) -> Self {
        self.mask_drawable = Some(resource);
        self
    }

    /// Use a host drawable as the mask
    pub fn foreground_drawable(mut self, drawable: DrawableHandle) -> Self {
        self.foreground_drawable = Some(drawable);
        self
    }

    /// Generate an oval mask
    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Vibrate when a press completes
    pub fn haptics(mut self, enabled: bool) -> Self {
        self.haptics = enabled;
        self
    }

    /// Install the darkening foreground
    pub fn foreground(mut self, enabled: bool) -> Self {
        self.foreground = enabled;
        self
    }

    pub fn down_duration_ms(mut self, duration_ms: f32) -> Self {
        self.down_duration_ms = duration_ms;
        self
    }

    pub fn up_duration_ms(mut self, duration_ms: f32) -> Self {
        self.up_duration_ms = duration_ms;
        self
    }

    pub fn down_curve(mut self, curve: EasingCurve) -> Self {
        self.down_curve = curve;
        self
    }

    pub fn up_curve(mut self, curve: EasingCurve) -> Self {
        self.up_curve = curve;
        self
    }

    /// Set how long the delayed variant waits before pressing
    pub fn press_delay_ms(mut self, delay_ms: f32) -> Self {
        self.press_delay_ms = delay_ms;
        self
    }
}
