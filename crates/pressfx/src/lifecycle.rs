//! Lifecycle guard
//!
//! Ties the animator to the container owning its views. The host forwards the
//! container's events; on destruction the guard detaches and tells the
//! animator to stop touching the views.

use std::rc::Rc;

use pressfx_platform::{LifecycleEvent, LifecycleOwner, ObserverId};

/// Registration with a [`LifecycleOwner`]
pub struct LifecycleGuard {
    owner: Option<Rc<dyn LifecycleOwner>>,
    observer: ObserverId,
}

impl LifecycleGuard {
    /// Register with `owner`
    pub fn bind(owner: Rc<dyn LifecycleOwner>) -> Self {
        let observer = owner.add_observer();
        tracing::debug!("LifecycleGuard: bound as {:?}", observer);
        Self {
            owner: Some(owner),
            observer,
        }
    }

    /// Handle an event from the owner
    ///
    /// Returns `true` when the owner was destroyed and in-flight animations
    /// must be cancelled. The guard is detached by then.
    pub fn on_event(&mut self, event: LifecycleEvent) -> bool {
        if !event.is_destroy() || !self.is_attached() {
            return false;
        }
        self.finish();
        true
    }

    /// Detach from the owner and drop the reference to it
    pub fn finish(&mut self) {
        if let Some(owner) = self.owner.take() {
            owner.remove_observer(self.observer);
            tracing::debug!("LifecycleGuard: detached {:?}", self.observer);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }
}

impl Drop for LifecycleGuard {
    fn drop(&mut self) {
        self.finish();
    }
}
