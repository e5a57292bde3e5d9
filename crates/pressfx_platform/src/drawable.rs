//! Colors and foreground mask drawables

use serde::{Deserialize, Serialize};

/// An 8-bit ARGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Build from a packed `0xAARRGGBB` value
    pub const fn from_argb_hex(hex: u32) -> Self {
        Self {
            a: (hex >> 24) as u8,
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Pack into `0xAARRGGBB`
    pub const fn to_argb_hex(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_argb_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb_hex()
    }
}

/// Per-corner radii of a rounded rectangle, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl CornerRadii {
    pub fn new(top_left: f32, top_right: f32, bottom_left: f32, bottom_right: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }
}

/// Opaque handle to a drawable owned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawableHandle(pub u64);

/// Outline of a generated mask
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskShape {
    Oval,
    RoundRect(CornerRadii),
}

/// The drawable installed as a view's foreground layer
#[derive(Clone, Debug, PartialEq)]
pub enum MaskDrawable {
    /// A solid shape filled with a color
    Shape { shape: MaskShape, color: Color },
    /// A drawable supplied by the host
    Drawable(DrawableHandle),
}
