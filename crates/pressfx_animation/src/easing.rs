//! Cubic Bézier easing
//!
//! A timing curve is a cubic Bézier through (0, 0) and (1, 1) with two free
//! control points. Mapping elapsed time `x` to progress `y` requires inverting
//! `x(t)`. Rather than solving analytically, the evaluator walks `t` forward in
//! steps of `1 / STEP_COUNT` until `x(t)` reaches the input, then evaluates `y`
//! at that `t`.
//!
//! The step index of the last hit is remembered and the next scan starts from
//! there. Frame updates arrive with increasing progress, so each frame scans
//! only the few steps since the previous one. Outputs above 0.999 snap to 1.0
//! and rewind the scan for the next run. Visual tuning depends on these exact
//! outputs, so the resolution and the snapping must stay as they are.

use serde::{Deserialize, Serialize};

/// Number of `t` steps in the forward scan
pub const STEP_COUNT: usize = 4096;

/// Outputs above this value snap to exactly 1.0
const SNAP_THRESHOLD: f64 = 0.999;

/// One coordinate of a cubic Bézier at parameter `t`
pub fn cubic_bezier(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let u = 1.0 - t;
    let mut value = p0 * u.powi(3);
    value += 3.0 * u.powi(2) * t * p1;
    value += 3.0 * u * t.powi(2) * p2;
    value += t.powi(3) * p3;
    value
}

/// Control points of a cubic Bézier timing curve
///
/// The curve always starts at (0, 0) and ends at (1, 1); only the two inner
/// control points are stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EasingCurve {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl EasingCurve {
    /// The standard press/release curve
    pub const STANDARD: EasingCurve = EasingCurve::new(0.33, 0.0, 0.67, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// All control points must lie within [0, 1]
    ///
    /// Time coordinates outside it break the monotonic `x(t)` scan, and
    /// progress coordinates outside it would overshoot the animated values.
    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Stateful evaluator for an [`EasingCurve`]
#[derive(Clone, Debug)]
pub struct CubicEasing {
    curve: EasingCurve,
    last_step: usize,
    last_input: f32,
}

impl CubicEasing {
    pub fn new(curve: EasingCurve) -> Self {
        Self {
            curve,
            last_step: 0,
            last_input: 0.0,
        }
    }

    pub fn curve(&self) -> EasingCurve {
        self.curve
    }

    /// Forget the cached scan position
    pub fn reset(&mut self) {
        self.last_step = 0;
        self.last_input = 0.0;
    }

    /// Map a normalized time in [0, 1] to eased progress in [0, 1]
    pub fn interpolate(&mut self, input: f32) -> f32 {
        // A smaller input means a restarted or reversed run; the cached step
        // would overshoot it.
        if input < self.last_input {
            self.last_step = 0;
        }
        self.last_input = input;

        let x1 = self.curve.x1 as f64;
        let x2 = self.curve.x2 as f64;
        let mut t = input;
        for step in self.last_step..STEP_COUNT {
            t = step as f32 / STEP_COUNT as f32;
            let x = cubic_bezier(t as f64, 0.0, x1, x2, 1.0);
            if x >= input as f64 {
                self.last_step = step;
                break;
            }
        }

        let mut value = cubic_bezier(t as f64, 0.0, self.curve.y1 as f64, self.curve.y2 as f64, 1.0);
        if value > SNAP_THRESHOLD {
            value = 1.0;
            self.last_step = 0;
        }
        value as f32
    }
}
