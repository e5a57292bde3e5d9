//! Touch input types

// ============================================================================
// Touch Events
// ============================================================================

/// Phase of a touch gesture
///
/// Only the phase drives the press state machine; positions are carried for
/// hosts that want them but are never read by the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down
    Down,
    /// Finger moved while down
    Move,
    /// Finger lifted
    Up,
    /// Gesture taken away by the system or a parent (e.g. a scroll container)
    Cancel,
}

impl TouchPhase {
    /// Whether this phase belongs to a finger that is still on the screen
    pub fn is_active(self) -> bool {
        matches!(self, TouchPhase::Down | TouchPhase::Move)
    }
}

/// Touch events for touchscreens
#[derive(Clone, Debug)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in window coordinates
        x: f32,
        /// Y position in window coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
        /// X position when ended
        x: f32,
        /// Y position when ended
        y: f32,
    },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled {
        /// Unique identifier for this touch
        id: u64,
    },
}

impl TouchEvent {
    /// Build a position-less event for the given phase
    pub fn from_phase(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Down => TouchEvent::Started { id: 0, x: 0.0, y: 0.0 },
            TouchPhase::Move => TouchEvent::Moved { id: 0, x: 0.0, y: 0.0 },
            TouchPhase::Up => TouchEvent::Ended { id: 0, x: 0.0, y: 0.0 },
            TouchPhase::Cancel => TouchEvent::Cancelled { id: 0 },
        }
    }

    /// Get the gesture phase
    pub fn phase(&self) -> TouchPhase {
        match self {
            TouchEvent::Started { .. } => TouchPhase::Down,
            TouchEvent::Moved { .. } => TouchPhase::Move,
            TouchEvent::Ended { .. } => TouchPhase::Up,
            TouchEvent::Cancelled { .. } => TouchPhase::Cancel,
        }
    }

    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            TouchEvent::Started { x, y, .. } => Some((*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some((*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some((*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}

/// The view that receives the touch stream
///
/// The host keeps the pressed state up to date (it is set while a finger is
/// held on the view and cleared when the gesture turns into a scroll or ends).
pub trait TouchSource {
    /// Whether the view currently shows its pressed state
    fn is_pressed(&self) -> bool;
}
