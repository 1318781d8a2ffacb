//! In-memory document for headless hosts.
//!
//! [`MemoryDocument`] implements [`ElementSource`] without a real DOM. Every
//! element records what the controller did to it, which makes it the natural
//! backend for tests, previews and server-side rendering of the panel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use twbus_core::{Property, Signal};

use super::{
    ContainerElement, DisclosureItemElement, ElementResult, ElementSource, ToggleControlElement,
};
use crate::accessibility::{AccessibleRole, Affordance};
use crate::animation::{TransitionStyle, VisualState};
use crate::config::ElementSelectors;
use crate::error::ElementError;
use crate::input::{ContainerInput, ControlInput, Key};

/// An in-memory panel container.
#[derive(Debug)]
pub struct MemoryContainer {
    expanded: Property<bool>,
    input: Signal<ContainerInput>,
}

impl MemoryContainer {
    fn new() -> Self {
        Self {
            expanded: Property::new(false),
            input: Signal::new(),
        }
    }

    /// Whether the "expanded" marker is set.
    pub fn is_marked_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Simulate a touch starting at `y`.
    pub fn touch_start(&self, y: f32) {
        self.input.emit(ContainerInput::TouchStart { y });
    }

    /// Simulate a touch ending at `y`.
    pub fn touch_end(&self, y: f32) {
        self.input.emit(ContainerInput::TouchEnd { y });
    }

    /// Simulate a swipe from `from_y` to `to_y`.
    pub fn swipe(&self, from_y: f32, to_y: f32) {
        self.touch_start(from_y);
        self.touch_end(to_y);
    }

    /// Simulate a viewport resize or rotation.
    pub fn viewport_changed(&self) {
        self.input.emit(ContainerInput::ViewportChanged);
    }
}

impl ContainerElement for MemoryContainer {
    fn set_expanded_marker(&self, expanded: bool) -> ElementResult<()> {
        self.expanded.set(expanded);
        Ok(())
    }

    fn input(&self) -> &Signal<ContainerInput> {
        &self.input
    }
}

/// An in-memory toggle control.
#[derive(Debug)]
pub struct MemoryToggleControl {
    affordance: Property<Option<Affordance>>,
    interactive: Property<bool>,
    role: Property<Option<AccessibleRole>>,
    focusable: Property<bool>,
    input: Signal<ControlInput>,
}

impl MemoryToggleControl {
    fn new() -> Self {
        Self {
            affordance: Property::new(None),
            interactive: Property::new(true),
            role: Property::new(None),
            focusable: Property::new(false),
            input: Signal::new(),
        }
    }

    /// The affordance currently displayed.
    pub fn affordance(&self) -> Option<Affordance> {
        self.affordance.get()
    }

    /// Whether pointer interaction is enabled.
    pub fn is_interactive(&self) -> bool {
        self.interactive.get()
    }

    /// The assigned accessibility role.
    pub fn role(&self) -> Option<AccessibleRole> {
        self.role.get()
    }

    /// Whether the control is reachable with the keyboard.
    pub fn is_focusable(&self) -> bool {
        self.focusable.get()
    }

    /// Simulate a primary click.
    ///
    /// Like a real control with pointer events disabled, a non-interactive
    /// control swallows the click. Returns whether the click was delivered.
    pub fn click(&self) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.input.emit(ControlInput::Click);
        true
    }

    /// Simulate a key press while the control has focus.
    pub fn key_down(&self, key: Key) {
        self.input.emit(ControlInput::KeyDown(key));
    }
}

impl ToggleControlElement for MemoryToggleControl {
    fn set_affordance(&self, affordance: &Affordance) -> ElementResult<()> {
        self.affordance.set(Some(affordance.clone()));
        Ok(())
    }

    fn set_interactive(&self, interactive: bool) -> ElementResult<()> {
        self.interactive.set(interactive);
        Ok(())
    }

    fn set_accessible_role(&self, role: AccessibleRole, focusable: bool) -> ElementResult<()> {
        self.role.set(Some(role));
        self.focusable.set(focusable);
        Ok(())
    }

    fn input(&self) -> &Signal<ControlInput> {
        &self.input
    }
}

/// An in-memory disclosure item.
#[derive(Debug)]
pub struct MemoryItem {
    id: String,
    visual: Property<VisualState>,
    history: Mutex<Vec<VisualState>>,
    transition: Property<Option<TransitionStyle>>,
    flushes: AtomicUsize,
    attached: AtomicBool,
}

impl MemoryItem {
    fn new(id: String) -> Self {
        Self {
            id,
            visual: Property::new(VisualState::Hidden),
            history: Mutex::new(Vec::new()),
            transition: Property::new(None),
            flushes: AtomicUsize::new(0),
            attached: AtomicBool::new(true),
        }
    }

    /// The current visual state, even when detached.
    pub fn state(&self) -> VisualState {
        self.visual.get()
    }

    /// Every visual state applied so far, in order.
    pub fn history(&self) -> Vec<VisualState> {
        self.history.lock().clone()
    }

    /// Forget the recorded history.
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Number of layout flushes requested.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    /// The installed transition style.
    pub fn transition(&self) -> Option<TransitionStyle> {
        self.transition.get()
    }

    /// Whether the item is still in the document.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn ensure_attached(&self) -> ElementResult<()> {
        if self.is_attached() {
            Ok(())
        } else {
            Err(ElementError::detached(&self.id))
        }
    }
}

impl DisclosureItemElement for MemoryItem {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn visual_state(&self) -> ElementResult<VisualState> {
        self.ensure_attached()?;
        Ok(self.visual.get())
    }

    fn apply_visual_state(&self, state: VisualState) -> ElementResult<()> {
        self.ensure_attached()?;
        self.visual.set(state);
        self.history.lock().push(state);
        Ok(())
    }

    fn flush_layout(&self) -> ElementResult<()> {
        self.ensure_attached()?;
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn apply_transition(&self, style: &TransitionStyle) -> ElementResult<()> {
        self.ensure_attached()?;
        self.transition.set(Some(*style));
        Ok(())
    }
}

#[derive(Default)]
struct DocumentTree {
    containers: Vec<(String, Arc<MemoryContainer>)>,
    controls: Vec<(String, Arc<MemoryToggleControl>)>,
    items: Vec<(String, Arc<MemoryItem>)>,
}

/// A headless document holding panel elements keyed by selector.
#[derive(Default)]
pub struct MemoryDocument {
    tree: RwLock<DocumentTree>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete panel using the default selectors and `item_count` extra
    /// stops named `stop-1`, `stop-2`, ...
    pub fn route_panel(item_count: usize) -> Self {
        let selectors = ElementSelectors::default();
        let document = Self::new();
        document.insert_container(&selectors.container);
        document.insert_toggle_control(&selectors.toggle_control);
        for n in 1..=item_count {
            document.append_item(&selectors.items, format!("stop-{n}"));
        }
        document
    }

    /// Add a container matching `selector`.
    pub fn insert_container(&self, selector: &str) -> Arc<MemoryContainer> {
        let container = Arc::new(MemoryContainer::new());
        self.tree
            .write()
            .containers
            .push((selector.to_string(), container.clone()));
        container
    }

    /// Add a toggle control matching `selector`.
    pub fn insert_toggle_control(&self, selector: &str) -> Arc<MemoryToggleControl> {
        let control = Arc::new(MemoryToggleControl::new());
        self.tree
            .write()
            .controls
            .push((selector.to_string(), control.clone()));
        control
    }

    /// Append a disclosure item matching `selector`.
    pub fn append_item(&self, selector: &str, id: impl Into<String>) -> Arc<MemoryItem> {
        let item = Arc::new(MemoryItem::new(id.into()));
        self.tree
            .write()
            .items
            .push((selector.to_string(), item.clone()));
        item
    }

    /// Remove the item with `id` from the document.
    ///
    /// Handles still held elsewhere report [`ElementError::Detached`] from then
    /// on. Returns whether an item was removed.
    pub fn remove_item(&self, id: &str) -> bool {
        let mut tree = self.tree.write();
        let Some(pos) = tree.items.iter().position(|(_, item)| item.id == id) else {
            return false;
        };
        let (_, item) = tree.items.remove(pos);
        item.attached.store(false, Ordering::SeqCst);
        true
    }

    /// The first container in the document.
    pub fn first_container(&self) -> Option<Arc<MemoryContainer>> {
        self.tree.read().containers.first().map(|(_, c)| c.clone())
    }

    /// The first toggle control in the document.
    pub fn first_toggle_control(&self) -> Option<Arc<MemoryToggleControl>> {
        self.tree.read().controls.first().map(|(_, c)| c.clone())
    }

    /// Every item currently in the document, in order.
    pub fn items(&self) -> Vec<Arc<MemoryItem>> {
        self.tree
            .read()
            .items
            .iter()
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// The item with `id`, if it is in the document.
    pub fn item(&self, id: &str) -> Option<Arc<MemoryItem>> {
        self.tree
            .read()
            .items
            .iter()
            .find(|(_, item)| item.id == id)
            .map(|(_, item)| item.clone())
    }
}

impl ElementSource for MemoryDocument {
    fn container(&self, selector: &str) -> Option<Arc<dyn ContainerElement>> {
        self.tree
            .read()
            .containers
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, c)| c.clone() as Arc<dyn ContainerElement>)
    }

    fn toggle_control(&self, selector: &str) -> Option<Arc<dyn ToggleControlElement>> {
        self.tree
            .read()
            .controls
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, c)| c.clone() as Arc<dyn ToggleControlElement>)
    }

    fn disclosure_items(&self, selector: &str) -> Vec<Arc<dyn DisclosureItemElement>> {
        self.tree
            .read()
            .items
            .iter()
            .filter(|(s, _)| s == selector)
            .map(|(_, item)| item.clone() as Arc<dyn DisclosureItemElement>)
            .collect()
    }
}
