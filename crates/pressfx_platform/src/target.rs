//! View capability trait

use crate::drawable::MaskDrawable;
use crate::geometry::{Point, Rect, Size};

/// Stable identity of a participating view, assigned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// A view property the press effect animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewProperty {
    ScaleX,
    ScaleY,
    TranslationX,
    TranslationY,
}

impl ViewProperty {
    /// Resting value of the property
    pub fn identity(self) -> f32 {
        match self {
            ViewProperty::ScaleX | ViewProperty::ScaleY => 1.0,
            ViewProperty::TranslationX | ViewProperty::TranslationY => 0.0,
        }
    }
}

/// A view taking part in the press effect
///
/// Implemented per rendering backend. Geometry is read when the animations
/// are built and never re-queried while they run. Setters take `&self`
/// because backends hand out shared view handles; they are only ever called
/// from the UI thread.
pub trait PressTarget {
    /// Identity used to deduplicate registrations
    fn view_id(&self) -> ViewId;

    /// Laid-out size in pixels (zero until measured)
    fn size(&self) -> Size;

    /// Top-left corner in screen coordinates
    fn screen_position(&self) -> Point;

    /// Whether the view takes part in layout and drawing
    fn is_visible(&self) -> bool;

    /// Set an animated property
    fn set_property(&self, property: ViewProperty, value: f32);

    /// Whether a foreground layer is installed
    fn has_foreground(&self) -> bool;

    /// Install a foreground layer
    fn set_foreground(&self, mask: MaskDrawable);

    /// Set the foreground layer's alpha (0 = hidden, 255 = opaque)
    fn set_foreground_alpha(&self, alpha: u8);

    /// Bounds in screen coordinates
    fn screen_bounds(&self) -> Rect {
        Rect::from_origin_size(self.screen_position(), self.size())
    }
}
