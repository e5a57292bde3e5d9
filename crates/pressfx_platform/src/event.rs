//! Lifecycle events and owners

/// Lifecycle events of an owning UI container (screen, page, fragment...)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Container was created
    Created,
    /// Container became visible
    Started,
    /// Container came to the foreground
    Resumed,
    /// Container left the foreground
    Paused,
    /// Container is no longer visible
    Stopped,
    /// Container was destroyed; its views must no longer be touched
    Destroyed,
}

impl LifecycleEvent {
    /// Whether this event tears the container down
    pub fn is_destroy(self) -> bool {
        matches!(self, LifecycleEvent::Destroyed)
    }
}

/// Handle for an observer registered with a [`LifecycleOwner`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// An owning UI container that publishes lifecycle events
///
/// The host forwards events for registered observers; the observer side
/// only needs to be able to register and unregister itself.
pub trait LifecycleOwner {
    /// Register a new observer and return its handle
    fn add_observer(&self) -> ObserverId;

    /// Unregister a previously added observer
    fn remove_observer(&self, observer: ObserverId);
}
