//! Scripted gestures
//!
//! A scenario file lists views and timed events:
//!
//! ```toml
//! duration_ms = 600
//!
//! [[views]]
//! id = 1
//! bounds = [50.0, 50.0, 100.0, 100.0]
//! target = true
//!
//! [[views]]
//! id = 2
//! bounds = [30.0, 80.0, 40.0, 40.0]
//!
//! [[events]]
//! at_ms = 0
//! pressed = true
//! touch = "down"
//!
//! [[events]]
//! at_ms = 320
//! pressed = false
//! touch = "up"
//! ```
//!
//! and may embed a `[config]` table with the press config.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use pressfx::headless::{HeadlessHaptics, HeadlessLifecycle, HeadlessResources, HeadlessView};
use pressfx::{HostServices, PressAnimator, PressConfig};
use pressfx_platform::{
    HostCapabilities, LifecycleEvent, Rect, TouchEvent, TouchPhase, ViewId, ViewProperty,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A scripted gesture
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    /// How long to run the clock
    #[serde(default = "default_duration")]
    pub duration_ms: f32,
    /// Run on a host without foreground layers, reverse playback or amplitude control
    #[serde(default)]
    pub minimal_host: bool,
    #[serde(default = "default_true")]
    pub vibrator: bool,
    pub views: Vec<ScenarioView>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
    #[serde(default)]
    pub config: Option<PressConfig>,
}

fn default_duration() -> f32 {
    1000.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioView {
    pub id: u64,
    /// x, y, width, height
    pub bounds: [f32; 4],
    #[serde(default)]
    pub target: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTouch {
    Down,
    Move,
    Up,
    Cancel,
}

impl From<ScenarioTouch> for TouchPhase {
    fn from(touch: ScenarioTouch) -> Self {
        match touch {
            ScenarioTouch::Down => TouchPhase::Down,
            ScenarioTouch::Move => TouchPhase::Move,
            ScenarioTouch::Up => TouchPhase::Up,
            ScenarioTouch::Cancel => TouchPhase::Cancel,
        }
    }
}

/// Things that can happen at a point in time, applied in field order
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScenarioEvent {
    pub at_ms: f32,
    /// New pressed state of the touched view
    #[serde(default)]
    pub pressed: Option<bool>,
    /// Touch delivered to the target
    #[serde(default)]
    pub touch: Option<ScenarioTouch>,
    /// The owning container is destroyed
    #[serde(default)]
    pub destroy: bool,
    /// The target is re-attached to its window
    #[serde(default)]
    pub attach: bool,
    /// Call `cancel()` directly
    #[serde(default)]
    pub cancel: bool,
}

/// Summary of a run
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub frames: usize,
    pub haptics: usize,
    pub final_scale: f32,
    pub final_alpha: Option<u8>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(s).context("Failed to parse scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.views.is_empty() {
            bail!("Scenario has no views");
        }
        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }

    /// Replay the scenario, printing one line per frame
    pub fn run(&self, config: PressConfig, frame_ms: f32) -> Result<Report> {
        if frame_ms <= 0.0 {
            bail!("Frame length must be positive, got {}ms", frame_ms);
        }
        let capabilities = if self.minimal_host {
            HostCapabilities::MINIMAL
        } else {
            HostCapabilities::FULL
        };
        let haptics = HeadlessHaptics::new(self.vibrator);
        let services = HostServices::new(haptics.clone(), Rc::new(HeadlessResources::new()))
            .capabilities(capabilities);
        let mut animator = PressAnimator::new(&config, services);
        let owner = HeadlessLifecycle::new();
        animator.bind_lifecycle(owner.clone());

        let mut views: HashMap<u64, Rc<HeadlessView>> = HashMap::new();
        for entry in &self.views {
            let [x, y, w, h] = entry.bounds;
            let view = HeadlessView::new(ViewId(entry.id), Rect::new(x, y, w, h));
            view.set_visible(entry.visible);
            animator.add_view(view.clone(), entry.target);
            views.insert(entry.id, view);
        }
        let touched = match self.views.iter().find(|v| v.target) {
            Some(entry) => views[&entry.id].clone(),
            None => views[&self.views[0].id].clone(),
        };

        let mut events: Vec<&ScenarioEvent> = self.events.iter().collect();
        events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        let mut events = events.into_iter().peekable();

        let mut report = Report::default();
        let mut now = 0.0;
        while now <= self.duration_ms {
            while let Some(event) = events.next_if(|e| e.at_ms <= now) {
                self.apply(event, &mut animator, &touched)?;
            }
            animator.on_frame(frame_ms)?;
            now += frame_ms;
            report.frames += 1;

            println!(
                "{:>6.0}ms  scale {:.3}  alpha {:>3}  {}",
                now,
                touched.property(ViewProperty::ScaleX),
                touched
                    .foreground_alpha()
                    .map_or_else(|| "-".to_string(), |a| a.to_string()),
                if animator.is_animating() { "animating" } else { "" },
            );
        }

        report.haptics = haptics.requests().len();
        report.final_scale = touched.property(ViewProperty::ScaleX);
        report.final_alpha = touched.foreground_alpha();
        info!(
            "{} frames, {} haptic request(s), observers left: {}",
            report.frames,
            report.haptics,
            owner.observer_count()
        );
        Ok(report)
    }

    fn apply(
        &self,
        event: &ScenarioEvent,
        animator: &mut PressAnimator,
        touched: &Rc<HeadlessView>,
    ) -> Result<()> {
        if let Some(pressed) = event.pressed {
            touched.set_pressed(pressed);
        }
        if let Some(touch) = event.touch {
            debug!("{}ms: touch {:?}", event.at_ms, touch);
            let phase = TouchPhase::from(touch);
            animator
                .on_touch(touched.clone(), &TouchEvent::from_phase(phase))
                .with_context(|| format!("Touch {:?} at {}ms", touch, event.at_ms))?;
        }
        if event.attach {
            animator.on_target_attached();
        }
        if event.cancel {
            animator.cancel();
        }
        if event.destroy {
            info!("{}ms: owner destroyed", event.at_ms);
            animator.on_lifecycle(LifecycleEvent::Destroyed);
        }
        Ok(())
    }
}
