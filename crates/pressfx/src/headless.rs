//! In-memory host
//!
//! Views, haptics, resources and lifecycle owners that keep their state in
//! memory. Used by the simulator and by tests, and handy for embedding the
//! effect into a renderer that has no native view objects of its own.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use pressfx_platform::{
    Color, HapticRequest, Haptics, LifecycleOwner, MaskDrawable, ObserverId, PlatformError,
    Point, PressTarget, Rect, ResourceId, ResourceKind, ResourceResolver, Size, TouchSource,
    ViewId, ViewProperty,
};

/// A view whose properties are plain cells
#[derive(Debug)]
pub struct HeadlessView {
    id: ViewId,
    bounds: Cell<Rect>,
    visible: Cell<bool>,
    pressed: Cell<bool>,
    properties: RefCell<HashMap<ViewProperty, f32>>,
    foreground: RefCell<Option<MaskDrawable>>,
    foreground_alpha: Cell<Option<u8>>,
    foreground_installs: Cell<u32>,
}

impl HeadlessView {
    pub fn new(id: ViewId, bounds: Rect) -> Rc<Self> {
        Rc::new(Self {
            id,
            bounds: Cell::new(bounds),
            visible: Cell::new(true),
            pressed: Cell::new(false),
            properties: RefCell::new(HashMap::new()),
            foreground: RefCell::new(None),
            foreground_alpha: Cell::new(None),
            foreground_installs: Cell::new(0),
        })
    }

    /// Simulate a layout pass
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Simulate the host's pressed state
    pub fn set_pressed(&self, pressed: bool) {
        self.pressed.set(pressed);
    }

    /// Current value of an animated property (identity if never set)
    pub fn property(&self, property: ViewProperty) -> f32 {
        self.properties
            .borrow()
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.identity())
    }

    /// The installed mask
    pub fn foreground(&self) -> Option<MaskDrawable> {
        self.foreground.borrow().clone()
    }

    /// Alpha of the installed mask, `None` before one was installed
    pub fn foreground_alpha(&self) -> Option<u8> {
        self.foreground_alpha.get()
    }

    /// How many times a mask was installed
    pub fn foreground_installs(&self) -> u32 {
        self.foreground_installs.get()
    }
}

impl PressTarget for HeadlessView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn size(&self) -> Size {
        self.bounds.get().size
    }

    fn screen_position(&self) -> Point {
        self.bounds.get().origin
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn set_property(&self, property: ViewProperty, value: f32) {
        self.properties.borrow_mut().insert(property, value);
    }

    fn has_foreground(&self) -> bool {
        self.foreground.borrow().is_some()
    }

    fn set_foreground(&self, mask: MaskDrawable) {
        *self.foreground.borrow_mut() = Some(mask);
        self.foreground_installs.set(self.foreground_installs.get() + 1);
    }

    fn set_foreground_alpha(&self, alpha: u8) {
        if self.has_foreground() {
            self.foreground_alpha.set(Some(alpha));
        }
    }
}

impl TouchSource for HeadlessView {
    fn is_pressed(&self) -> bool {
        self.pressed.get()
    }
}

/// Records vibration requests instead of vibrating
#[derive(Debug)]
pub struct HeadlessHaptics {
    available: bool,
    requests: RefCell<Vec<HapticRequest>>,
}

impl HeadlessHaptics {
    pub fn new(available: bool) -> Rc<Self> {
        Rc::new(Self {
            available,
            requests: RefCell::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HapticRequest> {
        self.requests.borrow().clone()
    }
}

impl Haptics for HeadlessHaptics {
    fn is_available(&self) -> bool {
        self.available
    }

    fn vibrate(&self, request: HapticRequest) {
        tracing::trace!("HeadlessHaptics: vibrate {:?}", request);
        self.requests.borrow_mut().push(request);
    }
}

/// Resource tables
#[derive(Clone, Debug, Default)]
pub struct HeadlessResources {
    colors: HashMap<ResourceId, Color>,
    dimensions: HashMap<ResourceId, f32>,
    drawables: HashMap<ResourceId, MaskDrawable>,
}

impl HeadlessResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, id: ResourceId, color: Color) -> Self {
        self.colors.insert(id, color);
        self
    }

    pub fn with_dimension(mut self, id: ResourceId, px: f32) -> Self {
        self.dimensions.insert(id, px);
        self
    }

    pub fn with_drawable(mut self, id: ResourceId, drawable: MaskDrawable) -> Self {
        self.drawables.insert(id, drawable);
        self
    }
}

fn not_found(kind: ResourceKind, id: ResourceId) -> PlatformError {
    PlatformError::ResourceNotFound { kind, id }
}

impl ResourceResolver for HeadlessResources {
    fn color(&self, id: ResourceId) -> pressfx_platform::Result<Color> {
        self.colors
            .get(&id)
            .copied()
            .ok_or_else(|| not_found(ResourceKind::Color, id))
    }

    fn dimension(&self, id: ResourceId) -> pressfx_platform::Result<f32> {
        self.dimensions
            .get(&id)
            .copied()
            .ok_or_else(|| not_found(ResourceKind::Dimension, id))
    }

    fn drawable(&self, id: ResourceId) -> pressfx_platform::Result<MaskDrawable> {
        self.drawables
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(ResourceKind::Drawable, id))
    }
}

/// Lifecycle owner that only tracks registrations
#[derive(Debug, Default)]
pub struct HeadlessLifecycle {
    next_id: Cell<u64>,
    observers: RefCell<HashSet<ObserverId>>,
}

impl HeadlessLifecycle {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl LifecycleOwner for HeadlessLifecycle {
    fn add_observer(&self) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().insert(id);
        id
    }

    fn remove_observer(&self, observer: ObserverId) {
        self.observers.borrow_mut().remove(&observer);
    }
}
