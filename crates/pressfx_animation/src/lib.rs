//! pressfx Animation Engine
//!
//! Timed property animations for the press effect.
//!
//! # Features
//!
//! - **Cubic Easing**: Bézier timing curves evaluated by a cached forward scan
//! - **Property Tracks**: Scale and translation tracks bound to host views
//! - **Animation Sets**: Tracks that play together with one duration and curve,
//!   forwards or in reverse, driven by host frame ticks
//! - **Delayed Tasks**: Cancellable scheduled callbacks on the same clock

pub mod easing;
pub mod scheduler;
pub mod set;
pub mod values;

pub use easing::{cubic_bezier, CubicEasing, EasingCurve, STEP_COUNT};
pub use scheduler::{DelayedTasks, TaskId};
pub use set::{AnimationFrame, AnimationSet, Direction};
pub use values::{Interpolate, PropertyTrack, ViewAnimation};
