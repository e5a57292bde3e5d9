//! Host services: capabilities, haptics and resources

use serde::{Deserialize, Serialize};

use crate::drawable::{Color, MaskDrawable};
use crate::error::Result;

/// What the host platform supports
///
/// Mobile backends map these to OS version checks; other backends report what
/// their compositor and input stack can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Views can carry a foreground layer with its own alpha
    pub foreground_layer: bool,
    /// Animation sets can be played backwards from their end
    pub reverse_playback: bool,
    /// Vibration requests can carry an amplitude
    pub haptic_amplitude: bool,
}

impl HostCapabilities {
    /// A host supporting everything
    pub const FULL: HostCapabilities = HostCapabilities {
        foreground_layer: true,
        reverse_playback: true,
        haptic_amplitude: true,
    };

    /// A host without foreground layers, reverse playback or amplitude control
    pub const MINIMAL: HostCapabilities = HostCapabilities {
        foreground_layer: false,
        reverse_playback: false,
        haptic_amplitude: false,
    };
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// A one-shot vibration request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HapticRequest {
    /// Vibration length in milliseconds
    pub duration_ms: u64,
    /// Amplitude (1-255), `None` when the host has no amplitude control
    pub amplitude: Option<u8>,
}

/// The host's vibration service
pub trait Haptics {
    /// Whether a vibrator is present
    fn is_available(&self) -> bool;

    /// Issue a one-shot vibration
    fn vibrate(&self, request: HapticRequest);
}

/// Identifier of a host resource (color, dimension, drawable)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// Resolves resource ids into concrete values
///
/// Missing resources are a configuration mistake and surface as
/// [`PlatformError::ResourceNotFound`](crate::PlatformError::ResourceNotFound).
pub trait ResourceResolver {
    /// Resolve a color resource
    fn color(&self, id: ResourceId) -> Result<Color>;

    /// Resolve a dimension resource to pixels
    fn dimension(&self, id: ResourceId) -> Result<f32>;

    /// Resolve a drawable resource
    fn drawable(&self, id: ResourceId) -> Result<MaskDrawable>;
}
