//! Press and release animation sets
//!
//! The target only scales. Every sibling scales by the same ratio and also
//! slides towards the target's center by the distance the target's shrink
//! would pull it, so the group reads as one element pressing in:
//!
//! ```text
//! offset = (1 - scale_ratio) * (target_center - sibling_center)
//! ```
//!
//! The release plays the inverse tracks (offset back to 0, scale back to 1).

use pressfx_animation::{AnimationSet, EasingCurve, ViewAnimation};
use pressfx_platform::{Point, PressTarget, ViewProperty};

use crate::views::AnimatorViewSet;

/// Centers closer than this are treated as coincident
pub const CENTER_TOLERANCE_PX: f32 = 1.0;

/// Timing of one half of the gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub duration_ms: f32,
    pub curve: EasingCurve,
}

/// Translation that keeps a sibling anchored to the shrinking target
///
/// Zero on an axis where the centers coincide, and zero on both axes for a
/// hidden sibling.
pub fn translation_offset(
    scale_ratio: f32,
    target_center: Point,
    sibling_center: Point,
    sibling_visible: bool,
) -> Point {
    if !sibling_visible {
        return Point::ZERO;
    }
    let axis = |target: f32, sibling: f32| {
        if (target - sibling).abs() <= CENTER_TOLERANCE_PX {
            0.0
        } else {
            (1.0 - scale_ratio) * (target - sibling)
        }
    };
    Point::new(
        axis(target_center.x, sibling_center.x),
        axis(target_center.y, sibling_center.y),
    )
}

/// The press set and the release set, always built together
#[derive(Clone, Debug)]
pub struct AnimationPair {
    pub down: AnimationSet,
    pub up: AnimationSet,
}

impl AnimationPair {
    /// Build both sets from the views' current geometry
    pub fn build(
        views: &AnimatorViewSet,
        target: &dyn PressTarget,
        scale_ratio: f32,
        down_timing: Timing,
        up_timing: Timing,
    ) -> Self {
        let target_id = target.view_id();
        let target_center = target.screen_bounds().center();

        let mut down_anims = Vec::with_capacity(views.len());
        let mut up_anims = Vec::with_capacity(views.len());
        for view in views.iter() {
            let id = view.view_id();
            let mut down = ViewAnimation::new(id);

            if id != target_id {
                let offset = translation_offset(
                    scale_ratio,
                    target_center,
                    view.screen_bounds().center(),
                    view.is_visible(),
                );
                down = down
                    .track(ViewProperty::TranslationX, 0.0, offset.x)
                    .track(ViewProperty::TranslationY, 0.0, offset.y);
            }

            let down = down
                .track(ViewProperty::ScaleX, 1.0, scale_ratio)
                .track(ViewProperty::ScaleY, 1.0, scale_ratio);
            up_anims.push(down.reversed());
            down_anims.push(down);
        }

        tracing::debug!(
            "AnimationPair: built for {} views around {:?}",
            down_anims.len(),
            target_center
        );

        Self {
            down: AnimationSet::new(down_timing.duration_ms, down_timing.curve)
                .play_together(down_anims),
            up: AnimationSet::new(up_timing.duration_ms, up_timing.curve).play_together(up_anims),
        }
    }

    /// Whether either set is playing
    pub fn is_running(&self) -> bool {
        self.down.is_running() || self.up.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessView;
    use pressfx_platform::{Rect, ViewId};

    const TIMING: Timing = Timing {
        duration_ms: 200.0,
        curve: EasingCurve::STANDARD,
    };

    #[test]
    fn test_coincident_centers_have_no_offset() {
        let center = Point::new(100.0, 100.0);
        assert_eq!(translation_offset(0.65, center, center, true), Point::ZERO);
        assert_eq!(
            translation_offset(0.65, center, Point::new(100.6, 99.5), true),
            Point::ZERO
        );
    }

    #[test]
    fn test_hidden_sibling_has_no_offset() {
        let offset = translation_offset(0.65, Point::new(100.0, 100.0), Point::new(0.0, 0.0), false);
        assert_eq!(offset, Point::ZERO);
    }

    #[test]
    fn test_offset_pulls_towards_target() {
        let offset =
            translation_offset(0.65, Point::new(100.0, 100.0), Point::new(50.0, 100.0), true);
        assert!((offset.x - 17.5).abs() < 1e-4);
        assert_eq!(offset.y, 0.0);

        let offset =
            translation_offset(0.5, Point::new(100.0, 100.0), Point::new(100.0, 140.0), true);
        assert_eq!(offset, Point::new(0.0, -20.0));
    }

    #[test]
    fn test_pair_tracks() {
        // Target centered at (100, 100), sibling centered at (50, 100)
        let target = HeadlessView::new(ViewId(1), Rect::new(50.0, 50.0, 100.0, 100.0));
        let sibling = HeadlessView::new(ViewId(2), Rect::new(30.0, 80.0, 40.0, 40.0));
        let mut views = AnimatorViewSet::new();
        views.add(target.clone(), true);
        views.add(sibling, false);

        let pair = AnimationPair::build(&views, &*target, 0.65, TIMING, TIMING);

        let target_down = pair.down.animation_for(ViewId(1)).unwrap();
        assert_eq!(target_down.tracks().len(), 2);
        assert_eq!(target_down.get(ViewProperty::ScaleX).map(|t| (t.from, t.to)), Some((1.0, 0.65)));
        assert!(target_down.get(ViewProperty::TranslationX).is_none());

        let sibling_down = pair.down.animation_for(ViewId(2)).unwrap();
        let tx = sibling_down.get(ViewProperty::TranslationX).unwrap();
        assert_eq!(tx.from, 0.0);
        assert!((tx.to - 17.5).abs() < 1e-4);
        assert_eq!(sibling_down.get(ViewProperty::TranslationY).map(|t| t.to), Some(0.0));

        let sibling_up = pair.up.animation_for(ViewId(2)).unwrap();
        let tx = sibling_up.get(ViewProperty::TranslationX).unwrap();
        assert!((tx.from - 17.5).abs() < 1e-4);
        assert_eq!(tx.to, 0.0);
        assert_eq!(sibling_up.get(ViewProperty::ScaleY).map(|t| (t.from, t.to)), Some((0.65, 1.0)));

        assert_eq!(pair.down.duration_ms(), 200.0);
        assert!(!pair.is_running());
    }
}
