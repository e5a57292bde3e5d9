//! Animation sets
//!
//! An [`AnimationSet`] plays a group of [`ViewAnimation`]s together with one
//! duration and one easing curve. The host's animation clock drives it through
//! [`AnimationSet::tick`]; each tick yields an [`AnimationFrame`] describing
//! where the set is, and the caller applies [`AnimationSet::values_at`] to its
//! views.

use pressfx_platform::{ViewId, ViewProperty};

use crate::easing::{CubicEasing, EasingCurve};
use crate::values::ViewAnimation;

/// Playback direction of a running set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// State of a set after one clock tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// Direction the set was playing in
    pub direction: Direction,
    /// Position along the set (0 = start values, 1 = end values), before easing
    pub fraction: f32,
    /// Position after easing; feed this to [`AnimationSet::values_at`]
    pub eased: f32,
    /// The set reached its end on this tick and is no longer running
    pub finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct Run {
    elapsed_ms: f32,
    direction: Direction,
}

/// A group of view animations sharing duration and easing
#[derive(Clone, Debug)]
pub struct AnimationSet {
    duration_ms: f32,
    easing: CubicEasing,
    animations: Vec<ViewAnimation>,
    run: Option<Run>,
}

impl AnimationSet {
    /// Create an empty set
    pub fn new(duration_ms: f32, curve: EasingCurve) -> Self {
        Self {
            duration_ms,
            easing: CubicEasing::new(curve),
            animations: Vec::new(),
            run: None,
        }
    }

    /// Add animations that play together (builder pattern)
    pub fn play_together(mut self, animations: impl IntoIterator<Item = ViewAnimation>) -> Self {
        self.animations.extend(animations);
        self
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn curve(&self) -> EasingCurve {
        self.easing.curve()
    }

    pub fn animations(&self) -> &[ViewAnimation] {
        &self.animations
    }

    /// The animation playing on a given view
    pub fn animation_for(&self, view: ViewId) -> Option<&ViewAnimation> {
        self.animations.iter().find(|anim| anim.view() == view)
    }

    /// Play from the start values towards the end values
    ///
    /// Restarts from the beginning if already running.
    pub fn start(&mut self) {
        self.easing.reset();
        self.run = Some(Run {
            elapsed_ms: 0.0,
            direction: Direction::Forward,
        });
        tracing::trace!(
            "AnimationSet: start ({} views, {}ms)",
            self.animations.len(),
            self.duration_ms
        );
    }

    /// Play from the end values back towards the start values
    ///
    /// A running set turns around at its current position; an idle set starts
    /// from its end.
    pub fn reverse(&mut self) {
        self.run = Some(match self.run {
            Some(run) => Run {
                elapsed_ms: (self.duration_ms - run.elapsed_ms).max(0.0),
                direction: match run.direction {
                    Direction::Forward => Direction::Reverse,
                    Direction::Reverse => Direction::Forward,
                },
            },
            None => Run {
                elapsed_ms: 0.0,
                direction: Direction::Reverse,
            },
        });
        tracing::trace!("AnimationSet: reverse ({} views)", self.animations.len());
    }

    /// Stop without reaching the end
    ///
    /// Returns the direction the set was playing in, or `None` if it was idle.
    pub fn cancel(&mut self) -> Option<Direction> {
        self.run.take().map(|run| run.direction)
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Direction of the current run
    pub fn direction(&self) -> Option<Direction> {
        self.run.map(|run| run.direction)
    }

    /// Advance the set by `dt_ms` milliseconds
    ///
    /// Returns `None` when the set is not running.
    pub fn tick(&mut self, dt_ms: f32) -> Option<AnimationFrame> {
        let run = self.run.as_mut()?;
        run.elapsed_ms += dt_ms.max(0.0);
        let elapsed_ms = run.elapsed_ms;
        let direction = run.direction;

        let linear = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        let fraction = match direction {
            Direction::Forward => linear,
            Direction::Reverse => 1.0 - linear,
        };
        let finished = linear >= 1.0;
        if finished {
            self.run = None;
        }

        let eased = self.easing.interpolate(fraction);
        Some(AnimationFrame {
            direction,
            fraction,
            eased,
            finished,
        })
    }

    /// Every animated property value at eased position `eased`
    pub fn values_at(&self, eased: f32) -> impl Iterator<Item = (ViewId, ViewProperty, f32)> + '_ {
        self.animations.iter().flat_map(move |anim| {
            let view = anim.view();
            anim.values_at(eased)
                .map(move |(property, value)| (view, property, value))
        })
    }
}
