//! Participating views and target selection

use std::rc::Rc;

use indexmap::IndexMap;
use pressfx_platform::{PressTarget, ViewId};

/// Shared handle to a host view
pub type ViewHandle = Rc<dyn PressTarget>;

/// Ordered, duplicate-free set of views animated together
///
/// One of them is the target: the scale reference whose center every
/// sibling offset is computed from. It is either flagged explicitly or
/// chosen as the largest view (by `width + height`) once layout has given
/// it a size. Once chosen it never changes.
#[derive(Default)]
pub struct AnimatorViewSet {
    views: IndexMap<ViewId, ViewHandle>,
    target: Option<ViewId>,
}

impl AnimatorViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view; `is_target` makes it the target and moves it to the
    /// front. Views already registered are ignored.
    pub fn add(&mut self, view: ViewHandle, is_target: bool) {
        let id = view.view_id();
        if self.views.contains_key(&id) {
            return;
        }
        if is_target {
            self.target = Some(id);
            self.views.shift_insert(0, id, view);
        } else {
            self.views.insert(id, view);
        }
    }

    /// Register a batch; `first_is_target` makes the first view the target
    pub fn add_all(&mut self, views: impl IntoIterator<Item = ViewHandle>, first_is_target: bool) {
        let mut views = views.into_iter().peekable();
        if first_is_target {
            if let Some(first) = views.peek() {
                self.target = Some(first.view_id());
            }
        }
        for view in views {
            let id = view.view_id();
            self.views.entry(id).or_insert(view);
        }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewHandle> {
        self.views.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHandle> {
        self.views.values()
    }

    /// The target, if already chosen
    pub fn target(&self) -> Option<&ViewHandle> {
        self.target.and_then(|id| self.views.get(&id))
    }

    /// Choose the target if needed and return it
    ///
    /// Without an explicit target the views are ranked by size; the largest
    /// becomes the target only once it has a non-zero width.
    pub fn resolve_target(&mut self) -> Option<ViewHandle> {
        if self.target.is_none() && !self.views.is_empty() {
            self.views.sort_by(|_, a, _, b| {
                b.size().extent_sum().total_cmp(&a.size().extent_sum())
            });
            if let Some((id, first)) = self.views.first() {
                if first.size().width > 0.0 {
                    tracing::debug!("AnimatorViewSet: target resolved to {:?}", id);
                    self.target = Some(*id);
                }
            }
        }
        self.target().cloned()
    }
}
