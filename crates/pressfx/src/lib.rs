//! pressfx
//!
//! Coordinated press feedback for touch UIs. When a finger lands on a view,
//! the target view shrinks, its siblings scale with it while sliding towards
//! its center, a translucent mask darkens it and, once the press settles, the
//! device gives a short haptic tick. Lifting the finger plays it all back.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use pressfx::headless::{HeadlessHaptics, HeadlessResources, HeadlessView};
//! use pressfx::{HostServices, PressAnimator, PressConfig};
//! use pressfx_platform::{Rect, TouchEvent, TouchPhase, ViewId};
//!
//! let button = HeadlessView::new(ViewId(1), Rect::new(0.0, 0.0, 120.0, 48.0));
//! let label = HeadlessView::new(ViewId(2), Rect::new(8.0, 12.0, 60.0, 24.0));
//!
//! let services = HostServices::new(HeadlessHaptics::new(true), Rc::new(HeadlessResources::new()));
//! let mut animator = PressAnimator::new(&PressConfig::new().scale_ratio(0.9), services);
//! animator.add_view(button.clone(), true).add_view(label, false);
//!
//! button.set_pressed(true);
//! let consumed = animator
//!     .on_touch(button.clone(), &TouchEvent::from_phase(TouchPhase::Down))
//!     .unwrap();
//! assert!(!consumed);
//!
//! while animator.on_frame(16.0).unwrap() {}
//! ```
//!
//! # Modules
//!
//! - [`machine`] - Normal and Delayed touch state machines as pure transitions
//! - [`controller`] - builds, plays and cancels the press/release animations
//! - [`dispatch`] - [`PressAnimator`], wiring touches, frames and lifecycle
//! - [`overlay`] - the darkening foreground mask
//! - [`lifecycle`] - cancellation on container destruction
//! - [`headless`] - in-memory host for tests and simulation

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod headless;
pub mod lifecycle;
pub mod machine;
pub mod overlay;
pub mod pair;
pub mod views;

pub use config::{ColorRef, CornerConfig, Dimension, PressConfig, PressVariant};
pub use controller::{AnimationEvent, HostServices, PressController};
pub use dispatch::PressAnimator;
pub use error::{ConfigError, PressError, Result};
pub use lifecycle::LifecycleGuard;
pub use machine::{AnimatorStatus, PressCommand, PressMachine};
pub use overlay::ForegroundManager;
pub use pair::{translation_offset, AnimationPair, Timing};
pub use views::{AnimatorViewSet, ViewHandle};
