//! Darkening foreground mask
//!
//! A semi-transparent mask is installed as the target's foreground layer with
//! alpha 0 and follows the animations: it fades in with the press and out with
//! the release. Hosts without foreground layers, or configs that turn the
//! foreground off, skip all of it.

use pressfx_platform::{
    CornerRadii, HostCapabilities, MaskDrawable, MaskShape, PressTarget, ResourceResolver,
};

use crate::config::{ColorRef, Dimension, PressConfig};
use crate::error::Result;

/// Where the mask comes from, in priority order
#[derive(Clone, Debug, PartialEq)]
enum MaskSource {
    Drawable(pressfx_platform::DrawableHandle),
    DrawableResource(pressfx_platform::ResourceId),
    Shape,
}

/// Creates the mask and keeps its alpha in sync
#[derive(Clone, Debug)]
pub struct ForegroundManager {
    enabled: bool,
    source: MaskSource,
    circular: bool,
    color: ColorRef,
    corners: crate::config::CornerConfig,
    cached: Option<MaskDrawable>,
}

impl ForegroundManager {
    pub fn new(config: &PressConfig, capabilities: HostCapabilities) -> Self {
        let source = if let Some(drawable) = config.foreground_drawable {
            MaskSource::Drawable(drawable)
        } else if let Some(resource) = config.mask_drawable {
            MaskSource::DrawableResource(resource)
        } else {
            MaskSource::Shape
        };
        Self {
            enabled: config.foreground && capabilities.foreground_layer,
            source,
            circular: config.circular,
            color: config.mask_color,
            corners: config.corner_radius,
            cached: None,
        }
    }

    /// Whether the foreground is in use at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Install the mask on `target` with alpha 0 unless it already has one
    pub fn ensure_installed(
        &mut self,
        target: &dyn PressTarget,
        resources: &dyn ResourceResolver,
    ) -> Result<()> {
        if !self.enabled || target.has_foreground() {
            return Ok(());
        }
        let mask = self.mask(resources)?;
        target.set_foreground(mask);
        target.set_foreground_alpha(0);
        tracing::debug!("ForegroundManager: installed mask on {:?}", target.view_id());
        Ok(())
    }

    /// Resolve the mask drawable, reusing it once created
    pub fn mask(&mut self, resources: &dyn ResourceResolver) -> Result<MaskDrawable> {
        if let Some(mask) = &self.cached {
            return Ok(mask.clone());
        }
        let mask = match &self.source {
            MaskSource::Drawable(handle) => MaskDrawable::Drawable(*handle),
            MaskSource::DrawableResource(id) => resources.drawable(*id)?,
            MaskSource::Shape => {
                let color = match self.color {
                    ColorRef::Argb(color) => color,
                    ColorRef::Resource(id) => resources.color(id)?,
                };
                let shape = if self.circular {
                    MaskShape::Oval
                } else {
                    MaskShape::RoundRect(self.corner_radii(resources)?)
                };
                MaskDrawable::Shape { shape, color }
            }
        };
        self.cached = Some(mask.clone());
        Ok(mask)
    }

    fn corner_radii(&self, resources: &dyn ResourceResolver) -> Result<CornerRadii> {
        let px = |dimension: Dimension| -> Result<f32> {
            Ok(match dimension {
                Dimension::Px(px) => px,
                Dimension::Resource(id) => resources.dimension(id)?,
            })
        };
        Ok(CornerRadii::new(
            px(self.corners.top_left)?,
            px(self.corners.top_right)?,
            px(self.corners.bottom_left)?,
            px(self.corners.bottom_right)?,
        ))
    }

    /// Alpha while the press plays at eased progress `eased`
    pub fn press_alpha(eased: f32) -> u8 {
        (255.0 * eased.clamp(0.0, 1.0)) as u8
    }

    /// Alpha while the release plays at eased progress `eased`
    pub fn release_alpha(eased: f32) -> u8 {
        ((1.0 - eased.clamp(0.0, 1.0)) * 255.0) as u8
    }

    /// Set the mask alpha if the target carries one
    pub fn set_alpha(&self, target: &dyn PressTarget, alpha: u8) {
        if self.enabled && target.has_foreground() {
            target.set_foreground_alpha(alpha);
        }
    }

    /// Hide the mask
    pub fn hide(&self, target: &dyn PressTarget) {
        self.set_alpha(target, 0);
    }
}
