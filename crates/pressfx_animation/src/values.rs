//! Animated property values
//!
//! A [`PropertyTrack`] animates one view property between two values; a
//! [`ViewAnimation`] bundles the tracks that play on a single view.

use pressfx_platform::{ViewId, ViewProperty};
use smallvec::SmallVec;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// One property animated from `from` to `to`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTrack {
    pub property: ViewProperty,
    pub from: f32,
    pub to: f32,
}

impl PropertyTrack {
    pub fn new(property: ViewProperty, from: f32, to: f32) -> Self {
        Self { property, from, to }
    }

    /// The same track played backwards
    pub fn inverse(&self) -> Self {
        Self::new(self.property, self.to, self.from)
    }

    /// Value at eased progress `fraction`
    pub fn value_at(&self, fraction: f32) -> f32 {
        self.from.lerp(&self.to, fraction)
    }
}

/// All tracks that play on one view
#[derive(Clone, Debug, PartialEq)]
pub struct ViewAnimation {
    view: ViewId,
    tracks: SmallVec<[PropertyTrack; 4]>,
}

impl ViewAnimation {
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            tracks: SmallVec::new(),
        }
    }

    /// Add a track (builder pattern)
    pub fn track(mut self, property: ViewProperty, from: f32, to: f32) -> Self {
        self.tracks.push(PropertyTrack::new(property, from, to));
        self
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn tracks(&self) -> &[PropertyTrack] {
        &self.tracks
    }

    /// The same animation played backwards
    pub fn reversed(&self) -> Self {
        Self {
            view: self.view,
            tracks: self.tracks.iter().map(PropertyTrack::inverse).collect(),
        }
    }

    /// Look up the track for a property
    pub fn get(&self, property: ViewProperty) -> Option<&PropertyTrack> {
        self.tracks.iter().find(|track| track.property == property)
    }

    /// Property values at eased progress `fraction`
    pub fn values_at(&self, fraction: f32) -> impl Iterator<Item = (ViewProperty, f32)> + '_ {
        self.tracks
            .iter()
            .map(move |track| (track.property, track.value_at(fraction)))
    }
}
