//! Animation state controller
//!
//! Owns the participating views, the press/release animation pair and the
//! foreground mask, and applies animation frames to the views. It has no
//! notion of touches; [`PressAnimator`](crate::PressAnimator) decides when
//! to call into it.

use std::rc::Rc;

use smallvec::SmallVec;
use pressfx_animation::{AnimationSet, Direction};
use pressfx_platform::{HapticRequest, Haptics, HostCapabilities, PressTarget, ResourceResolver};

use crate::config::{PressConfig, HAPTIC_AMPLITUDE, HAPTIC_DURATION_MS};
use crate::error::Result;
use crate::machine::AnimatorStatus;
use crate::overlay::ForegroundManager;
use crate::pair::{AnimationPair, Timing};
use crate::views::{AnimatorViewSet, ViewHandle};

/// Host services the effect needs besides the views themselves
#[derive(Clone)]
pub struct HostServices {
    pub capabilities: HostCapabilities,
    pub haptics: Rc<dyn Haptics>,
    pub resources: Rc<dyn ResourceResolver>,
}

impl HostServices {
    /// Services for a host supporting every capability
    pub fn new(haptics: Rc<dyn Haptics>, resources: Rc<dyn ResourceResolver>) -> Self {
        Self {
            capabilities: HostCapabilities::FULL,
            haptics,
            resources,
        }
    }

    pub fn capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// Completion of an animation, reported by [`PressController::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The press reached the pressed-in state
    PressFinished,
    /// The press was stopped early
    PressCancelled,
    /// The views are back at rest
    ReleaseFinished,
    /// The release was stopped early
    ReleaseCancelled,
}

pub type AnimationEvents = SmallVec<[AnimationEvent; 2]>;

pub struct PressController {
    scale_ratio: f32,
    down_timing: Timing,
    up_timing: Timing,
    haptics_enabled: bool,
    views: AnimatorViewSet,
    pair: Option<AnimationPair>,
    foreground: ForegroundManager,
    services: HostServices,
}

impl PressController {
    pub fn new(config: &PressConfig, services: HostServices) -> Self {
        Self {
            scale_ratio: config.scale_ratio,
            down_timing: Timing {
                duration_ms: config.down_duration_ms,
                curve: config.down_curve,
            },
            up_timing: Timing {
                duration_ms: config.up_duration_ms,
                curve: config.up_curve,
            },
            haptics_enabled: config.haptics,
            views: AnimatorViewSet::new(),
            pair: None,
            foreground: ForegroundManager::new(config, services.capabilities),
            services,
        }
    }

    pub fn views(&self) -> &AnimatorViewSet {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut AnimatorViewSet {
        &mut self.views
    }

    /// The animation pair, once built
    pub fn pair(&self) -> Option<&AnimationPair> {
        self.pair.as_ref()
    }

    /// Choose the target if needed
    pub fn resolve_target(&mut self) -> Option<ViewHandle> {
        self.views.resolve_target()
    }

    /// Build the animation pair from the current geometry
    ///
    /// Does nothing without a target or when the pair already exists.
    /// Returns whether a pair exists afterwards.
    pub fn build_animations(&mut self) -> bool {
        if self.pair.is_some() {
            return true;
        }
        let Some(target) = self.views.target().cloned() else {
            return false;
        };
        self.pair = Some(AnimationPair::build(
            &self.views,
            &*target,
            self.scale_ratio,
            self.down_timing,
            self.up_timing,
        ));
        true
    }

    /// Resolve the target, build the animations and install the mask ahead
    /// of the first touch
    pub fn initialize(&mut self) -> Result<()> {
        let Some(target) = self.resolve_target() else {
            tracing::debug!("PressController: initialize before layout, nothing to do");
            return Ok(());
        };
        self.build_animations();
        self.foreground
            .ensure_installed(&*target, &*self.services.resources)
    }

    /// Play the press, installing the mask first
    pub fn start_down(&mut self) -> Result<()> {
        let Some(target) = self.views.target().cloned() else {
            return Ok(());
        };
        if !self.build_animations() {
            return Ok(());
        }
        self.foreground
            .ensure_installed(&*target, &*self.services.resources)?;
        if let Some(pair) = self.pair.as_mut() {
            pair.down.start();
        }
        Ok(())
    }

    /// Play the release
    ///
    /// When the views were measured too late for a press to have been built,
    /// the pair is built here and the release is played by reversing the
    /// press set if the host can, or by the release set otherwise.
    pub fn start_up(&mut self) {
        if let Some(pair) = self.pair.as_mut() {
            pair.up.start();
            return;
        }
        if self.views.is_empty() {
            return;
        }
        tracing::debug!("PressController: release without animations, building them now");
        self.resolve_target();
        if !self.build_animations() {
            return;
        }
        let reverse = self.services.capabilities.reverse_playback;
        if let Some(pair) = self.pair.as_mut() {
            if reverse {
                pair.down.reverse();
            } else {
                pair.up.start();
            }
        }
    }

    /// Stop the release if it is playing, else the press, and hide the mask
    pub fn cancel(&mut self) -> Option<AnimationEvent> {
        let pair = self.pair.as_mut()?;
        let event = if pair.up.is_running() {
            pair.up.cancel();
            AnimationEvent::ReleaseCancelled
        } else {
            match pair.down.cancel()? {
                Direction::Forward => AnimationEvent::PressCancelled,
                Direction::Reverse => AnimationEvent::ReleaseCancelled,
            }
        };
        if let Some(target) = self.views.target() {
            self.foreground.hide(&**target);
        }
        tracing::debug!("PressController: cancelled ({:?})", event);
        Some(event)
    }

    /// Advance running animations by `dt_ms` and apply their values
    pub fn tick(&mut self, dt_ms: f32) -> AnimationEvents {
        let mut events = AnimationEvents::new();
        let Some(pair) = self.pair.as_mut() else {
            return events;
        };
        let target = self.views.target().cloned();

        if let Some(frame) = pair.down.tick(dt_ms) {
            apply(&self.views, &pair.down, frame.eased);
            if let Some(target) = &target {
                self.foreground
                    .set_alpha(&**target, ForegroundManager::press_alpha(frame.eased));
            }
            if frame.finished {
                events.push(match frame.direction {
                    Direction::Forward => AnimationEvent::PressFinished,
                    Direction::Reverse => AnimationEvent::ReleaseFinished,
                });
            }
        }

        if let Some(frame) = pair.up.tick(dt_ms) {
            apply(&self.views, &pair.up, frame.eased);
            if let Some(target) = &target {
                self.foreground
                    .set_alpha(&**target, ForegroundManager::release_alpha(frame.eased));
            }
            if frame.finished {
                events.push(AnimationEvent::ReleaseFinished);
            }
        }

        if events.contains(&AnimationEvent::ReleaseFinished) {
            if let Some(target) = &target {
                self.foreground.hide(&**target);
            }
        }
        events
    }

    /// Issue the press haptic
    ///
    /// Skipped when haptics are off, before a target exists, for gestures
    /// that were not a genuine touch, and on hosts without a vibrator.
    pub fn vibrate(&self, genuine_touch: bool) {
        if !self.haptics_enabled || self.views.target().is_none() || !genuine_touch {
            return;
        }
        if !self.services.haptics.is_available() {
            tracing::debug!("PressController: no vibrator, skipping haptic");
            return;
        }
        let amplitude = self
            .services
            .capabilities
            .haptic_amplitude
            .then_some(HAPTIC_AMPLITUDE);
        self.services.haptics.vibrate(HapticRequest {
            duration_ms: HAPTIC_DURATION_MS,
            amplitude,
        });
    }

    /// Snapshot for the state machine
    ///
    /// A press set playing in reverse is a release.
    pub fn status(&self, pressed: bool) -> AnimatorStatus {
        let (down_running, up_running) = match &self.pair {
            Some(pair) => {
                let down = pair.down.direction();
                (
                    down == Some(Direction::Forward),
                    pair.up.is_running() || down == Some(Direction::Reverse),
                )
            }
            None => (false, false),
        };
        AnimatorStatus {
            ready: self.views.target().is_some(),
            built: self.pair.is_some(),
            down_running,
            up_running,
            pressed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.pair.as_ref().is_some_and(AnimationPair::is_running)
    }
}

fn apply(views: &AnimatorViewSet, set: &AnimationSet, eased: f32) {
    for (id, property, value) in set.values_at(eased) {
        if let Some(view) = views.get(id) {
            view.set_property(property, value);
        }
    }
}
