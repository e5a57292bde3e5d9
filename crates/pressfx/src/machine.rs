//! Press state machine
//!
//! Transitions are pure: they read an [`AnimatorStatus`] snapshot, update the
//! machine's flags and return the side effects for the caller to run, in
//! order. Nothing here touches a view.
//!
//! ```text
//! Idle --Down--> PressingDown --finished--> Pressed --Up--> ReleasingUp --finished--> Idle
//!                     |                                          ^
//!                     +--Up (wait_up)--> finished ---------------+
//! ```

use smallvec::SmallVec;
use pressfx_platform::TouchPhase;

use crate::config::PressVariant;

/// Side effect requested by a transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressCommand {
    /// Build the animation pair if it does not exist yet
    BuildAnimations,
    /// Play the press animation
    StartDown,
    /// Play the release animation
    StartUp,
    /// Run [`PressMachine::press_check`] after a delay, replacing any pending check
    SchedulePressCheck { delay_ms: f32 },
    /// Drop the pending press check
    CancelPressCheck,
    /// Issue the press haptic
    Vibrate,
}

/// Commands produced by one transition
pub type Commands = SmallVec<[PressCommand; 4]>;

/// What the animator looks like right now
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimatorStatus {
    /// A target view has been resolved
    pub ready: bool,
    /// The animation pair exists
    pub built: bool,
    pub down_running: bool,
    pub up_running: bool,
    /// The touched view shows its pressed state
    pub pressed: bool,
}

impl AnimatorStatus {
    fn is_running(&self) -> bool {
        self.down_running || self.up_running
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    /// `skipped` marks a gesture that began while an animation was running;
    /// it plays nothing until the next Down
    Normal { skipped: bool },
    Delayed,
}

/// Flags shared by both variants, plus the variant's own state
#[derive(Clone, Debug)]
pub struct PressMachine {
    variant: Variant,
    /// A release arrived while the press was playing
    wait_up: bool,
    /// A press animation was started for the current gesture
    started_down: bool,
    press_delay_ms: f32,
}

impl PressMachine {
    pub fn new(variant: PressVariant, press_delay_ms: f32) -> Self {
        let variant = match variant {
            PressVariant::Normal => Variant::Normal { skipped: false },
            PressVariant::Delayed => Variant::Delayed,
        };
        Self {
            variant,
            wait_up: false,
            started_down: false,
            press_delay_ms,
        }
    }

    pub fn variant(&self) -> PressVariant {
        match self.variant {
            Variant::Normal { .. } => PressVariant::Normal,
            Variant::Delayed => PressVariant::Delayed,
        }
    }

    /// A release is deferred until the press finishes
    pub fn is_waiting_up(&self) -> bool {
        self.wait_up
    }

    pub fn has_started_down(&self) -> bool {
        self.started_down
    }

    /// The current gesture was skipped (Normal variant only)
    pub fn is_skipped(&self) -> bool {
        matches!(self.variant, Variant::Normal { skipped: true })
    }

    /// Feed a touch phase
    pub fn on_touch(&mut self, phase: TouchPhase, status: AnimatorStatus) -> Commands {
        if !status.ready {
            return Commands::new();
        }
        match self.variant {
            Variant::Normal { .. } => self.normal_touch(phase, status),
            Variant::Delayed => self.delayed_touch(phase, status),
        }
    }

    fn normal_touch(&mut self, phase: TouchPhase, status: AnimatorStatus) -> Commands {
        let mut commands = Commands::new();
        match phase {
            TouchPhase::Down => {
                commands.push(PressCommand::BuildAnimations);
                if status.is_running() {
                    tracing::debug!("PressMachine: animation still running, skipping gesture");
                    self.variant = Variant::Normal { skipped: true };
                    return commands;
                }
                self.variant = Variant::Normal { skipped: false };
                self.started_down = true;
                commands.push(PressCommand::StartDown);
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                if status.down_running {
                    self.wait_up = true;
                } else if self.is_skipped() {
                    self.variant = Variant::Normal { skipped: false };
                    self.wait_up = false;
                } else {
                    self.wait_up = false;
                    commands.push(PressCommand::StartUp);
                }
            }
            TouchPhase::Move => {}
        }
        commands
    }

    fn delayed_touch(&mut self, phase: TouchPhase, status: AnimatorStatus) -> Commands {
        let mut commands = Commands::new();
        if status.up_running {
            return commands;
        }
        match phase {
            TouchPhase::Down => {
                commands.push(PressCommand::SchedulePressCheck {
                    delay_ms: self.press_delay_ms,
                });
            }
            TouchPhase::Move => {
                commands = self.press_check(status);
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                commands.push(PressCommand::CancelPressCheck);
                if !status.built || !self.started_down {
                    return commands;
                }
                if status.down_running {
                    self.wait_up = true;
                } else {
                    self.wait_up = false;
                    commands.push(PressCommand::StartUp);
                }
            }
        }
        commands
    }

    /// The delayed variant's check: press only if the view is still pressed
    /// and nothing is playing
    pub fn press_check(&mut self, status: AnimatorStatus) -> Commands {
        let mut commands = Commands::new();
        if !status.ready || (status.built && self.started_down) {
            return commands;
        }
        if !status.pressed || status.is_running() {
            tracing::trace!("PressMachine: press check rejected ({:?})", status);
            return commands;
        }
        self.started_down = true;
        commands.push(PressCommand::BuildAnimations);
        commands.push(PressCommand::StartDown);
        commands
    }

    /// The press animation reached its end
    pub fn on_down_finished(&mut self) -> Commands {
        let mut commands = Commands::new();
        if self.wait_up {
            self.wait_up = false;
            commands.push(PressCommand::StartUp);
        } else {
            commands.push(PressCommand::Vibrate);
        }
        commands
    }

    /// The press animation was cancelled
    pub fn on_down_cancelled(&mut self) {
        self.wait_up = false;
    }

    /// The release animation finished or was cancelled
    pub fn on_release_ended(&mut self) {
        self.wait_up = false;
        self.started_down = false;
    }

    /// A press is being started outside a touch transition
    pub fn on_start_down(&mut self) {
        self.started_down = true;
    }

    /// A release is being started outside a touch transition
    pub fn on_start_up(&mut self) {
        self.wait_up = false;
    }

    /// Forget the current gesture
    pub fn reset(&mut self) {
        if let Variant::Normal { skipped } = &mut self.variant {
            *skipped = false;
        }
        self.wait_up = false;
        self.started_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> AnimatorStatus {
        AnimatorStatus {
            ready: true,
            ..Default::default()
        }
    }

    fn pressing() -> AnimatorStatus {
        AnimatorStatus {
            ready: true,
            built: true,
            down_running: true,
            ..Default::default()
        }
    }

    fn idle_built() -> AnimatorStatus {
        AnimatorStatus {
            ready: true,
            built: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_not_ready_is_noop() {
        for variant in [PressVariant::Normal, PressVariant::Delayed] {
            let mut machine = PressMachine::new(variant, 150.0);
            for phase in [TouchPhase::Down, TouchPhase::Move, TouchPhase::Up] {
                assert!(machine.on_touch(phase, AnimatorStatus::default()).is_empty());
            }
        }
    }

    #[test]
    fn test_normal_tap() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        assert_eq!(
            machine.on_touch(TouchPhase::Down, ready()).as_slice(),
            &[PressCommand::BuildAnimations, PressCommand::StartDown]
        );
        assert!(machine.on_touch(TouchPhase::Move, pressing()).is_empty());
        assert_eq!(
            machine.on_touch(TouchPhase::Up, idle_built()).as_slice(),
            &[PressCommand::StartUp]
        );
    }

    #[test]
    fn test_normal_release_during_press_is_deferred_once() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        machine.on_touch(TouchPhase::Down, ready());
        assert!(machine.on_touch(TouchPhase::Up, pressing()).is_empty());
        assert!(machine.is_waiting_up());

        assert_eq!(machine.on_down_finished().as_slice(), &[PressCommand::StartUp]);
        assert!(!machine.is_waiting_up());
        assert_eq!(machine.on_down_finished().as_slice(), &[PressCommand::Vibrate]);
    }

    #[test]
    fn test_normal_down_while_running_skips_gesture() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        let running_up = AnimatorStatus {
            up_running: true,
            ..idle_built()
        };
        assert_eq!(
            machine.on_touch(TouchPhase::Down, running_up).as_slice(),
            &[PressCommand::BuildAnimations]
        );
        assert!(machine.is_skipped());
        assert!(machine.on_touch(TouchPhase::Up, idle_built()).is_empty());
        assert!(!machine.is_skipped());
        assert!(!machine.is_waiting_up());
    }

    #[test]
    fn test_normal_cancel_acts_like_up() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        machine.on_touch(TouchPhase::Down, ready());
        assert_eq!(
            machine.on_touch(TouchPhase::Cancel, idle_built()).as_slice(),
            &[PressCommand::StartUp]
        );
    }

    #[test]
    fn test_delayed_down_schedules_check() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        assert_eq!(
            machine.on_touch(TouchPhase::Down, ready()).as_slice(),
            &[PressCommand::SchedulePressCheck { delay_ms: 150.0 }]
        );
    }

    #[test]
    fn test_delayed_check_requires_pressed_and_idle() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        assert!(machine.press_check(ready()).is_empty());
        assert!(!machine.has_started_down());

        let pressed = AnimatorStatus {
            pressed: true,
            ..ready()
        };
        assert_eq!(
            machine.press_check(pressed).as_slice(),
            &[PressCommand::BuildAnimations, PressCommand::StartDown]
        );
        assert!(machine.has_started_down());

        // Already pressed for this gesture
        let pressed_built = AnimatorStatus { built: true, ..pressed };
        assert!(machine.press_check(pressed_built).is_empty());
    }

    #[test]
    fn test_delayed_move_checks_immediately() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        let pressed = AnimatorStatus {
            pressed: true,
            ..ready()
        };
        assert_eq!(
            machine.on_touch(TouchPhase::Move, pressed).as_slice(),
            &[PressCommand::BuildAnimations, PressCommand::StartDown]
        );
    }

    #[test]
    fn test_delayed_up_without_press_only_cancels_check() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        machine.on_touch(TouchPhase::Down, ready());
        assert_eq!(
            machine.on_touch(TouchPhase::Up, ready()).as_slice(),
            &[PressCommand::CancelPressCheck]
        );
    }

    #[test]
    fn test_delayed_release_paths() {
        let pressed = AnimatorStatus {
            pressed: true,
            ..ready()
        };

        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        machine.press_check(pressed);
        assert_eq!(
            machine.on_touch(TouchPhase::Up, pressing()).as_slice(),
            &[PressCommand::CancelPressCheck]
        );
        assert!(machine.is_waiting_up());

        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        machine.press_check(pressed);
        assert_eq!(
            machine.on_touch(TouchPhase::Up, idle_built()).as_slice(),
            &[PressCommand::CancelPressCheck, PressCommand::StartUp]
        );

        let releasing = AnimatorStatus {
            up_running: true,
            ..idle_built()
        };
        assert!(machine.on_touch(TouchPhase::Up, releasing).is_empty());
    }

    #[test]
    fn test_release_end_clears_started_down() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        machine.press_check(AnimatorStatus {
            pressed: true,
            ..ready()
        });
        machine.on_release_ended();
        assert!(!machine.has_started_down());
    }

    #[test]
    fn test_release_end_clears_wait() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        machine.on_touch(TouchPhase::Down, ready());
        machine.on_touch(TouchPhase::Up, pressing());
        assert!(machine.is_waiting_up());
        machine.on_release_ended();
        assert!(!machine.is_waiting_up());
        assert_eq!(machine.on_down_finished().as_slice(), &[PressCommand::Vibrate]);
    }

    #[test]
    fn test_delayed_release_after_programmatic_press() {
        let mut machine = PressMachine::new(PressVariant::Delayed, 150.0);
        machine.on_start_down();
        assert!(machine.has_started_down());
        assert_eq!(
            machine.on_touch(TouchPhase::Up, idle_built()).as_slice(),
            &[PressCommand::CancelPressCheck, PressCommand::StartUp]
        );
    }

    #[test]
    fn test_down_cancel_clears_wait() {
        let mut machine = PressMachine::new(PressVariant::Normal, 150.0);
        machine.on_touch(TouchPhase::Down, ready());
        machine.on_touch(TouchPhase::Up, pressing());
        machine.on_down_cancelled();
        assert_eq!(machine.on_down_finished().as_slice(), &[PressCommand::Vibrate]);
    }
}
