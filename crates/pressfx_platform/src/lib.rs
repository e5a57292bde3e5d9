//! pressfx Host Boundary
//!
//! This crate provides the platform-agnostic traits and types through which
//! the press effect talks to the host UI framework.
//!
//! # Architecture
//!
//! The press effect never touches a concrete UI element type. Instead the host
//! implements a small set of capability traits:
//!
//! - [`PressTarget`] - geometry, visibility, animated properties and the
//!   foreground layer of a participating view
//! - [`TouchSource`] - the pressed state of the view receiving touches
//! - [`Haptics`] - one-shot vibration requests
//! - [`ResourceResolver`] - colors, dimensions and drawables by resource id
//! - [`LifecycleOwner`] - the owning container whose destruction tears the
//!   effect down
//!
//! # Example
//!
//! ```ignore
//! use pressfx_platform::prelude::*;
//!
//! struct MyView { /* backend handle */ }
//!
//! impl PressTarget for MyView {
//!     fn view_id(&self) -> ViewId { ViewId(7) }
//!     fn size(&self) -> Size { Size::new(120.0, 48.0) }
//!     fn screen_position(&self) -> Point { Point::new(16.0, 300.0) }
//!     fn is_visible(&self) -> bool { true }
//!     fn set_property(&self, property: ViewProperty, value: f32) { /* ... */ }
//!     fn has_foreground(&self) -> bool { false }
//!     fn set_foreground(&self, mask: MaskDrawable) { /* ... */ }
//!     fn set_foreground_alpha(&self, alpha: u8) { /* ... */ }
//! }
//! ```

mod drawable;
mod error;
mod event;
mod geometry;
mod host;
mod input;
mod target;

// Re-export all public types
pub use drawable::{Color, CornerRadii, DrawableHandle, MaskDrawable, MaskShape};
pub use error::{PlatformError, ResourceKind, Result};
pub use event::{LifecycleEvent, LifecycleOwner, ObserverId};
pub use geometry::{Point, Rect, Size};
pub use host::{HapticRequest, Haptics, HostCapabilities, ResourceId, ResourceResolver};
pub use input::{TouchEvent, TouchPhase, TouchSource};
pub use target::{PressTarget, ViewId, ViewProperty};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::drawable::{Color, CornerRadii, DrawableHandle, MaskDrawable, MaskShape};
    pub use crate::error::{PlatformError, ResourceKind, Result};
    pub use crate::event::{LifecycleEvent, LifecycleOwner, ObserverId};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::host::{HapticRequest, Haptics, HostCapabilities, ResourceId, ResourceResolver};
    pub use crate::input::{TouchEvent, TouchPhase, TouchSource};
    pub use crate::target::{PressTarget, ViewId, ViewProperty};
}
