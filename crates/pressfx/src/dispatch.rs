//! Touch dispatch
//!
//! [`PressAnimator`] is the effect's entry point. The host forwards three
//! streams into it:
//!
//! - touch events from the view receiving touches ([`PressAnimator::on_touch`])
//! - animation clock ticks ([`PressAnimator::on_frame`])
//! - lifecycle events of the owning container ([`PressAnimator::on_lifecycle`])
//!
//! Touch events are never consumed, so the host keeps its own pressed/ripple
//! handling.

use std::rc::Rc;

use pressfx_animation::{DelayedTasks, TaskId};
use pressfx_platform::{LifecycleEvent, LifecycleOwner, TouchEvent, TouchPhase, TouchSource};

use crate::config::PressConfig;
use crate::controller::{AnimationEvent, HostServices, PressController};
use crate::error::Result;
use crate::lifecycle::LifecycleGuard;
use crate::machine::{Commands, PressCommand, PressMachine};
use crate::views::ViewHandle;

/// Press effect for one group of views
pub struct PressAnimator {
    controller: PressController,
    machine: PressMachine,
    /// Pending delayed press check, carrying the view it must inspect
    checks: DelayedTasks<Rc<dyn TouchSource>>,
    pending_check: Option<TaskId>,
    lifecycle: Option<LifecycleGuard>,
    /// The latest touch event was a Down or Move
    is_touch: bool,
    destroyed: bool,
}

impl PressAnimator {
    pub fn new(config: &PressConfig, services: HostServices) -> Self {
        Self {
            controller: PressController::new(config, services),
            machine: PressMachine::new(config.variant, config.press_delay_ms),
            checks: DelayedTasks::new(),
            pending_check: None,
            lifecycle: None,
            is_touch: false,
            destroyed: false,
        }
    }

    /// Register a participating view; `is_target` makes it the scale reference
    pub fn add_view(&mut self, view: ViewHandle, is_target: bool) -> &mut Self {
        self.controller.views_mut().add(view, is_target);
        self
    }

    /// Register several views; `first_is_target` makes the first one the
    /// scale reference
    pub fn add_views(
        &mut self,
        views: impl IntoIterator<Item = ViewHandle>,
        first_is_target: bool,
    ) -> &mut Self {
        self.controller.views_mut().add_all(views, first_is_target);
        self
    }

    /// Cancel everything when `owner` is destroyed
    ///
    /// Replaces any previous binding.
    pub fn bind_lifecycle(&mut self, owner: Rc<dyn LifecycleOwner>) -> &mut Self {
        if self.guard_destroyed("bind_lifecycle") {
            return self;
        }
        self.lifecycle = Some(LifecycleGuard::bind(owner));
        self
    }

    pub fn controller(&self) -> &PressController {
        &self.controller
    }

    pub fn machine(&self) -> &PressMachine {
        &self.machine
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a press or release is playing
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// A delayed press check is waiting to run
    pub fn has_pending_check(&self) -> bool {
        self.pending_check.is_some_and(|id| self.checks.is_pending(id))
    }

    pub fn is_lifecycle_bound(&self) -> bool {
        self.lifecycle.as_ref().is_some_and(LifecycleGuard::is_attached)
    }

    /// Prepare the animations and the mask ahead of the first touch
    ///
    /// A no-op before the views have been laid out.
    pub fn initialize(&mut self) -> Result<()> {
        if self.guard_destroyed("initialize") {
            return Ok(());
        }
        self.controller.initialize()
    }

    /// Play the press without a touch (never vibrates unless the last touch
    /// was a genuine Down or Move)
    pub fn start_down(&mut self) -> Result<()> {
        if self.guard_destroyed("start_down") {
            return Ok(());
        }
        self.controller.resolve_target();
        if self.controller.build_animations() {
            self.machine.on_start_down();
        }
        self.controller.start_down()
    }

    /// Play the release
    pub fn start_up(&mut self) {
        if self.guard_destroyed("start_up") {
            return;
        }
        self.machine.on_start_up();
        self.controller.start_up();
    }

    /// Stop whatever is playing, drop the pending press check and detach
    /// from the lifecycle owner
    pub fn cancel(&mut self) {
        if self.guard_destroyed("cancel") {
            return;
        }
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        self.cancel_pending_check();
        if let Some(event) = self.controller.cancel() {
            self.route_cancel(event);
        }
        if let Some(guard) = self.lifecycle.as_mut() {
            guard.finish();
        }
    }

    /// Detach from the lifecycle owner without cancelling
    pub fn finish_lifecycle(&mut self) {
        if let Some(guard) = self.lifecycle.as_mut() {
            guard.finish();
        }
    }

    /// The target view was attached to a window (again)
    pub fn on_target_attached(&mut self) {
        if self.guard_destroyed("on_target_attached") {
            return;
        }
        tracing::debug!("PressAnimator: target attached, cancelling");
        self.cancel_inner();
    }

    /// Handle a lifecycle event of the owning container
    pub fn on_lifecycle(&mut self, event: LifecycleEvent) {
        let destroyed = match self.lifecycle.as_mut() {
            Some(guard) => guard.on_event(event),
            None => false,
        };
        if destroyed {
            tracing::debug!("PressAnimator: owner destroyed, tearing down");
            self.cancel_inner();
            self.machine.reset();
            self.destroyed = true;
        }
    }

    /// Handle a touch event delivered to `source`
    ///
    /// Always returns `Ok(false)`: the event is never consumed.
    pub fn on_touch(&mut self, source: Rc<dyn TouchSource>, event: &TouchEvent) -> Result<bool> {
        if self.guard_destroyed("on_touch") {
            return Ok(false);
        }
        let phase = event.phase();
        self.is_touch = phase.is_active();

        self.controller.resolve_target();
        let status = self.controller.status(source.is_pressed());
        let commands = self.machine.on_touch(phase, status);
        tracing::trace!("PressAnimator: touch {} {:?} -> {:?}", event.id(), phase, commands);
        self.run(commands, Some(source))?;
        Ok(false)
    }

    /// Advance the clock by `dt_ms`
    ///
    /// Runs due press checks, then plays animations. Returns whether
    /// anything is still animating or pending, so the host knows to keep
    /// requesting frames.
    pub fn on_frame(&mut self, dt_ms: f32) -> Result<bool> {
        if self.destroyed {
            return Ok(false);
        }

        for (id, source) in self.checks.advance(dt_ms) {
            if self.pending_check == Some(id) {
                self.pending_check = None;
            }
            let status = self.controller.status(source.is_pressed());
            let commands = self.machine.press_check(status);
            self.run(commands, Some(source))?;
        }

        for event in self.controller.tick(dt_ms) {
            let commands = match event {
                AnimationEvent::PressFinished => self.machine.on_down_finished(),
                AnimationEvent::ReleaseFinished => {
                    self.machine.on_release_ended();
                    Commands::new()
                }
                event => {
                    self.route_cancel(event);
                    Commands::new()
                }
            };
            self.run(commands, None)?;
        }

        Ok(self.is_animating() || self.has_pending_check())
    }

    fn route_cancel(&mut self, event: AnimationEvent) {
        match event {
            AnimationEvent::PressCancelled => self.machine.on_down_cancelled(),
            AnimationEvent::ReleaseCancelled => self.machine.on_release_ended(),
            _ => {}
        }
    }

    fn run(&mut self, commands: Commands, source: Option<Rc<dyn TouchSource>>) -> Result<()> {
        for command in commands {
            match command {
                PressCommand::BuildAnimations => {
                    self.controller.build_animations();
                }
                PressCommand::StartDown => self.controller.start_down()?,
                PressCommand::StartUp => {
                    self.machine.on_start_up();
                    self.controller.start_up();
                }
                PressCommand::SchedulePressCheck { delay_ms } => {
                    self.cancel_pending_check();
                    if let Some(source) = source.clone() {
                        self.pending_check = Some(self.checks.schedule(delay_ms, source));
                    }
                }
                PressCommand::CancelPressCheck => self.cancel_pending_check(),
                PressCommand::Vibrate => self.controller.vibrate(self.is_touch),
            }
        }
        Ok(())
    }

    fn cancel_pending_check(&mut self) {
        if let Some(id) = self.pending_check.take() {
            self.checks.cancel(id);
        }
    }

    fn guard_destroyed(&self, operation: &str) -> bool {
        if self.destroyed {
            tracing::warn!("PressAnimator: {} after owner was destroyed, ignoring", operation);
        }
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PressVariant;
    use crate::headless::{HeadlessHaptics, HeadlessLifecycle, HeadlessResources, HeadlessView};
    use pressfx_platform::{
        DrawableHandle, HostCapabilities, MaskDrawable, PlatformError, Rect, ResourceId, ViewId,
        ViewProperty,
    };

    struct Fixture {
        animator: PressAnimator,
        target: Rc<HeadlessView>,
        haptics: Rc<HeadlessHaptics>,
    }

    impl Fixture {
        fn new(config: PressConfig) -> Self {
            Self::with_resources(config, HeadlessResources::new())
        }

        fn with_resources(config: PressConfig, resources: HeadlessResources) -> Self {
            let haptics = HeadlessHaptics::new(true);
            let services = HostServices::new(haptics.clone(), Rc::new(resources));
            let mut animator = PressAnimator::new(&config, services);
            let target = HeadlessView::new(ViewId(1), Rect::new(50.0, 50.0, 100.0, 100.0));
            animator
                .add_view(target.clone(), false)
                .add_view(HeadlessView::new(ViewId(2), Rect::new(0.0, 0.0, 20.0, 20.0)), false);
            Self {
                animator,
                target,
                haptics,
            }
        }

        fn touch(&mut self, phase: TouchPhase) -> bool {
            let source: Rc<dyn TouchSource> = self.target.clone();
            self.animator
                .on_touch(source, &TouchEvent::from_phase(phase))
                .unwrap()
        }

        fn frames(&mut self, total_ms: f32) {
            let mut elapsed = 0.0;
            while elapsed < total_ms {
                self.animator.on_frame(16.0).unwrap();
                elapsed += 16.0;
            }
        }

        fn scale(&self) -> f32 {
            self.target.property(ViewProperty::ScaleX)
        }
    }

    fn delayed() -> PressConfig {
        PressConfig::new().variant(PressVariant::Delayed)
    }

    #[test]
    fn test_touch_is_never_consumed() {
        let mut fx = Fixture::new(PressConfig::default());
        for phase in [TouchPhase::Down, TouchPhase::Move, TouchPhase::Up, TouchPhase::Cancel] {
            assert!(!fx.touch(phase));
        }
    }

    #[test]
    fn test_normal_tap_presses_vibrates_and_releases() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.touch(TouchPhase::Down);
        assert!(fx.animator.is_animating());
        fx.frames(208.0);
        assert!((fx.scale() - 0.65).abs() < 1e-5);
        assert_eq!(fx.haptics.requests().len(), 1);

        fx.touch(TouchPhase::Up);
        fx.frames(208.0);
        assert!((fx.scale() - 1.0).abs() < 1e-5);
        assert_eq!(fx.target.foreground_alpha(), Some(0));
        assert!(!fx.animator.is_animating());
    }

    #[test]
    fn test_normal_early_release_waits_for_press() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.touch(TouchPhase::Down);
        fx.frames(64.0);
        fx.touch(TouchPhase::Up);
        assert!(fx.animator.machine().is_waiting_up());
        assert!(fx.animator.controller().pair().unwrap().down.is_running());

        fx.frames(144.0);
        let pair = fx.animator.controller().pair().unwrap();
        assert!(!pair.down.is_running());
        assert!(pair.up.is_running());
        assert!(!fx.animator.machine().is_waiting_up());
        // The deferred release replaces the haptic
        assert!(fx.haptics.requests().is_empty());

        fx.frames(208.0);
        assert!(!fx.animator.is_animating());
        assert!((fx.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normal_down_while_animating_plays_nothing() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.touch(TouchPhase::Down);
        fx.frames(208.0);
        fx.touch(TouchPhase::Up);
        fx.frames(32.0);

        // Second gesture lands while the release is playing
        fx.touch(TouchPhase::Down);
        assert!(fx.animator.machine().is_skipped());
        fx.frames(208.0);
        fx.touch(TouchPhase::Up);
        assert!(!fx.animator.is_animating());
        assert!((fx.scale() - 1.0).abs() < 1e-5);
        assert_eq!(fx.haptics.requests().len(), 1);
    }

    #[test]
    fn test_delayed_quick_swipe_never_presses() {
        let mut fx = Fixture::new(delayed());
        fx.target.set_pressed(true);
        fx.touch(TouchPhase::Down);
        assert!(fx.animator.has_pending_check());

        fx.frames(96.0);
        fx.target.set_pressed(false);
        fx.frames(96.0);
        assert!(!fx.animator.is_animating());
        assert!(fx.animator.controller().pair().is_none());
        assert_eq!(fx.scale(), 1.0);
    }

    #[test]
    fn test_delayed_up_before_delay_cancels_check() {
        let mut fx = Fixture::new(delayed());
        fx.target.set_pressed(true);
        fx.touch(TouchPhase::Down);
        fx.frames(64.0);
        fx.touch(TouchPhase::Up);
        assert!(!fx.animator.has_pending_check());
        fx.frames(200.0);
        assert!(!fx.animator.is_animating());
    }

    #[test]
    fn test_delayed_press_after_hold() {
        let mut fx = Fixture::new(delayed());
        fx.target.set_pressed(true);
        fx.touch(TouchPhase::Down);
        fx.frames(160.0);
        assert!(fx.animator.machine().has_started_down());
        assert!(fx.animator.is_animating());

        fx.frames(208.0);
        assert!((fx.scale() - 0.65).abs() < 1e-5);
        assert_eq!(fx.haptics.requests().len(), 1);

        fx.target.set_pressed(false);
        fx.touch(TouchPhase::Up);
        fx.frames(208.0);
        assert!(!fx.animator.machine().has_started_down());
        assert!((fx.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_delayed_move_presses_immediately() {
        let mut fx = Fixture::new(delayed());
        fx.target.set_pressed(true);
        fx.touch(TouchPhase::Move);
        assert!(fx.animator.is_animating());
        assert!(fx.animator.machine().has_started_down());
    }

    #[test]
    fn test_programmatic_press_does_not_vibrate() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.animator.start_down().unwrap();
        fx.frames(208.0);
        assert!((fx.scale() - 0.65).abs() < 1e-5);
        assert!(fx.haptics.requests().is_empty());
    }

    #[test]
    fn test_delayed_programmatic_press_releases_on_up() {
        let mut fx = Fixture::new(delayed());
        fx.animator.start_down().unwrap();
        assert!(fx.animator.machine().has_started_down());
        fx.frames(224.0);
        assert!((fx.scale() - 0.65).abs() < 1e-5);

        fx.touch(TouchPhase::Up);
        fx.frames(224.0);
        assert!((fx.scale() - 1.0).abs() < 1e-5);
        assert!(!fx.animator.is_animating());
    }

    #[test]
    fn test_cancel_stops_and_detaches() {
        let mut fx = Fixture::new(PressConfig::default());
        let owner = HeadlessLifecycle::new();
        fx.animator.bind_lifecycle(owner.clone());
        assert!(fx.animator.is_lifecycle_bound());

        fx.touch(TouchPhase::Down);
        fx.frames(64.0);
        fx.animator.cancel();
        assert!(!fx.animator.is_animating());
        assert!(!fx.animator.is_lifecycle_bound());
        assert_eq!(owner.observer_count(), 0);
        assert_eq!(fx.target.foreground_alpha(), Some(0));
    }

    #[test]
    fn test_destroyed_owner_turns_animator_inert() {
        let mut fx = Fixture::new(PressConfig::default());
        let owner = HeadlessLifecycle::new();
        fx.animator.bind_lifecycle(owner.clone());
        fx.touch(TouchPhase::Down);
        fx.frames(64.0);

        fx.animator.on_lifecycle(LifecycleEvent::Stopped);
        assert!(!fx.animator.is_destroyed());
        fx.animator.on_lifecycle(LifecycleEvent::Destroyed);
        assert!(fx.animator.is_destroyed());
        assert!(!fx.animator.is_animating());
        assert_eq!(owner.observer_count(), 0);

        let scale = fx.scale();
        fx.animator.start_down().unwrap();
        fx.animator.start_up();
        fx.animator.cancel();
        fx.touch(TouchPhase::Down);
        assert!(!fx.animator.on_frame(16.0).unwrap());
        assert!(!fx.animator.is_animating());
        assert_eq!(fx.scale(), scale);
    }

    #[test]
    fn test_target_attach_cancels() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.touch(TouchPhase::Down);
        fx.frames(32.0);
        fx.animator.on_target_attached();
        assert!(!fx.animator.is_animating());
    }

    #[test]
    fn test_release_before_layout_builds_lazily() {
        let haptics = HeadlessHaptics::new(true);
        let services = HostServices::new(haptics, Rc::new(HeadlessResources::new()));
        let mut animator = PressAnimator::new(&PressConfig::default(), services);
        let view = HeadlessView::new(ViewId(1), Rect::new(0.0, 0.0, 0.0, 0.0));
        animator.add_view(view.clone(), false);

        // Not measured yet: the touch does nothing
        animator
            .on_touch(view.clone(), &TouchEvent::from_phase(TouchPhase::Down))
            .unwrap();
        assert!(animator.controller().pair().is_none());

        view.set_bounds(Rect::new(0.0, 0.0, 80.0, 40.0));
        animator.start_up();
        assert!(animator.is_animating());
        animator.on_frame(200.0).unwrap();
        assert!(!animator.is_animating());
        assert!((view.property(ViewProperty::ScaleX) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_gesture_during_lazy_release_leaves_no_deferred_release() {
        let haptics = HeadlessHaptics::new(true);
        let services = HostServices::new(haptics.clone(), Rc::new(HeadlessResources::new()));
        let mut animator = PressAnimator::new(&PressConfig::default(), services);
        let view = HeadlessView::new(ViewId(1), Rect::new(0.0, 0.0, 0.0, 0.0));
        animator.add_view(view.clone(), false);
        let touch = |animator: &mut PressAnimator, phase| {
            animator
                .on_touch(view.clone(), &TouchEvent::from_phase(phase))
                .unwrap();
        };

        touch(&mut animator, TouchPhase::Down);
        view.set_bounds(Rect::new(0.0, 0.0, 80.0, 40.0));
        touch(&mut animator, TouchPhase::Up);
        assert!(animator.controller().status(false).up_running);

        // Whole gesture lands while the press set plays in reverse
        touch(&mut animator, TouchPhase::Down);
        touch(&mut animator, TouchPhase::Up);
        assert!(!animator.machine().is_waiting_up());
        for _ in 0..13 {
            animator.on_frame(16.0).unwrap();
        }
        assert!(!animator.is_animating());
        assert!(!animator.machine().is_waiting_up());

        // The next press holds until the finger lifts
        touch(&mut animator, TouchPhase::Down);
        for _ in 0..14 {
            animator.on_frame(16.0).unwrap();
        }
        assert!((view.property(ViewProperty::ScaleX) - 0.65).abs() < 1e-5);
        assert!(!animator.controller().pair().unwrap().up.is_running());
        assert_eq!(haptics.requests().len(), 1);
    }

    #[test]
    fn test_initialize_installs_mask_once_laid_out() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.animator.initialize().unwrap();
        assert_eq!(fx.target.foreground_alpha(), Some(0));
        assert!(fx.animator.controller().pair().is_some());
    }

    #[test]
    fn test_foreground_follows_press() {
        let mut fx = Fixture::new(PressConfig::default());
        fx.touch(TouchPhase::Down);
        let mut last = 0;
        for _ in 0..13 {
            fx.animator.on_frame(16.0).unwrap();
            let alpha = fx.target.foreground_alpha().unwrap();
            assert!(alpha >= last);
            last = alpha;
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn test_no_foreground_on_minimal_host() {
        let haptics = HeadlessHaptics::new(false);
        let services = HostServices::new(haptics.clone(), Rc::new(HeadlessResources::new()))
            .capabilities(HostCapabilities::MINIMAL);
        let mut animator = PressAnimator::new(&PressConfig::default(), services);
        let view = HeadlessView::new(ViewId(1), Rect::new(0.0, 0.0, 80.0, 40.0));
        animator.add_view(view.clone(), true);

        animator
            .on_touch(view.clone(), &TouchEvent::from_phase(TouchPhase::Down))
            .unwrap();
        animator.on_frame(200.0).unwrap();
        assert!(view.foreground().is_none());
        assert!(haptics.requests().is_empty());
    }

    #[test]
    fn test_missing_mask_resource_surfaces_on_press() {
        let mut fx = Fixture::with_resources(
            PressConfig::new().mask_drawable(ResourceId(0x7f08_0001)),
            HeadlessResources::new(),
        );
        let source: Rc<dyn TouchSource> = fx.target.clone();
        let err = fx
            .animator
            .on_touch(source, &TouchEvent::from_phase(TouchPhase::Down))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::PressError::Platform(PlatformError::ResourceNotFound { .. })
        ));

        let mut fx = Fixture::with_resources(
            PressConfig::new().mask_drawable(ResourceId(0x7f08_0001)),
            HeadlessResources::new()
                .with_drawable(ResourceId(0x7f08_0001), MaskDrawable::Drawable(DrawableHandle(1))),
        );
        assert!(!fx.touch(TouchPhase::Down));
    }
}
