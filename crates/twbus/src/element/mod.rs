//! Element adapter.
//!
//! The disclosure controller never talks to a document directly. A host
//! implements [`ElementSource`] over whatever it renders with (a browser DOM,
//! a native widget tree, or the in-memory [`MemoryDocument`]) and the
//! [`ElementAdapter`] resolves handles through it by their configured
//! selectors.
//!
//! Handles are opaque: they expose only the operations the controller and
//! the animation driver need. A handle whose element has left the document
//! reports [`ElementError::Detached`] instead of panicking.

mod memory;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use twbus_core::Signal;
use twbus_core::logging::targets;

use crate::accessibility::{AccessibleRole, Affordance};
use crate::animation::{TransitionStyle, VisualState};
use crate::config::ElementSelectors;
use crate::error::ElementError;
use crate::input::{ContainerInput, ControlInput};

pub use memory::{MemoryContainer, MemoryDocument, MemoryItem, MemoryToggleControl};

/// Result type alias for element operations.
pub type ElementResult<T> = std::result::Result<T, ElementError>;

/// The kinds of element the panel is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Container,
    ToggleControl,
    DisclosureItem,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Container => "container",
            Self::ToggleControl => "toggle control",
            Self::DisclosureItem => "disclosure item",
        };
        f.write_str(name)
    }
}

/// The panel container.
pub trait ContainerElement: Send + Sync {
    /// Set the boolean "expanded" marker other observers may read.
    fn set_expanded_marker(&self, expanded: bool) -> ElementResult<()>;

    /// Touch and viewport input delivered by the container.
    fn input(&self) -> &Signal<ContainerInput>;
}

/// The expand/collapse control.
pub trait ToggleControlElement: Send + Sync {
    /// Show the glyph and accessible name for the next action.
    fn set_affordance(&self, affordance: &Affordance) -> ElementResult<()>;

    /// Enable or disable pointer interaction.
    fn set_interactive(&self, interactive: bool) -> ElementResult<()>;

    /// Assign the accessibility role and keyboard focusability.
    fn set_accessible_role(&self, role: AccessibleRole, focusable: bool) -> ElementResult<()>;

    /// Click and key input delivered by the control.
    fn input(&self) -> &Signal<ControlInput>;
}

/// One extra stop revealed on expand.
pub trait DisclosureItemElement: Send + Sync {
    /// A stable identifier, for diagnostics.
    fn id(&self) -> String;

    /// The item's current visual state.
    fn visual_state(&self) -> ElementResult<VisualState>;

    /// Apply a visual state.
    fn apply_visual_state(&self, state: VisualState) -> ElementResult<()>;

    /// Commit pending style changes so a following change animates from them.
    fn flush_layout(&self) -> ElementResult<()>;

    /// Install the transition used between visual states.
    fn apply_transition(&self, style: &TransitionStyle) -> ElementResult<()>;
}

/// Looks up elements by selector.
pub trait ElementSource: Send + Sync {
    /// The container matching `selector`.
    fn container(&self, selector: &str) -> Option<Arc<dyn ContainerElement>>;

    /// The toggle control matching `selector`.
    fn toggle_control(&self, selector: &str) -> Option<Arc<dyn ToggleControlElement>>;

    /// Every disclosure item matching `selector`, in document order.
    fn disclosure_items(&self, selector: &str) -> Vec<Arc<dyn DisclosureItemElement>>;
}

/// A disclosure item together with its ordinal among all items.
#[derive(Clone)]
pub struct DisclosureItem {
    handle: Arc<dyn DisclosureItemElement>,
    ordinal: usize,
}

impl DisclosureItem {
    /// Wrap a handle found at position `ordinal`.
    pub fn new(handle: Arc<dyn DisclosureItemElement>, ordinal: usize) -> Self {
        Self { handle, ordinal }
    }

    /// Position among all items, used for the reveal stagger.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// The underlying element.
    pub fn handle(&self) -> &dyn DisclosureItemElement {
        self.handle.as_ref()
    }
}

impl fmt::Debug for DisclosureItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureItem")
            .field("id", &self.handle.id())
            .field("ordinal", &self.ordinal)
            .finish()
    }
}

/// The required handles, resolved once per initialization.
#[derive(Clone)]
pub struct ResolvedElements {
    pub container: Arc<dyn ContainerElement>,
    pub control: Arc<dyn ToggleControlElement>,
}

/// Resolves element handles through an [`ElementSource`].
#[derive(Clone)]
pub struct ElementAdapter {
    source: Arc<dyn ElementSource>,
    selectors: ElementSelectors,
}

impl ElementAdapter {
    /// Create an adapter over `source`.
    pub fn new(source: Arc<dyn ElementSource>, selectors: ElementSelectors) -> Self {
        Self { source, selectors }
    }

    /// The selectors handles are resolved by.
    pub fn selectors(&self) -> &ElementSelectors {
        &self.selectors
    }

    /// Resolve the container and the toggle control.
    ///
    /// A missing handle is reported, never panicked on.
    pub fn resolve(&self) -> ElementResult<ResolvedElements> {
        let container = self
            .source
            .container(&self.selectors.container)
            .ok_or_else(|| {
                ElementError::missing(ElementRole::Container, &self.selectors.container)
            })?;
        let control = self
            .source
            .toggle_control(&self.selectors.toggle_control)
            .ok_or_else(|| {
                ElementError::missing(ElementRole::ToggleControl, &self.selectors.toggle_control)
            })?;

        debug!(
            target: targets::ELEMENT,
            container = %self.selectors.container,
            control = %self.selectors.toggle_control,
            "resolved panel elements"
        );
        Ok(ResolvedElements { container, control })
    }

    /// Enumerate the disclosure items currently in the document.
    pub fn enumerate_items(&self) -> Vec<DisclosureItem> {
        let items: Vec<DisclosureItem> = self
            .source
            .disclosure_items(&self.selectors.items)
            .into_iter()
            .enumerate()
            .map(|(ordinal, handle)| DisclosureItem::new(handle, ordinal))
            .collect();

        if items.is_empty() {
            warn!(target: targets::ELEMENT, selector = %self.selectors.items, "no disclosure items found");
        }
        items
    }
}

impl fmt::Debug for ElementAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementAdapter")
            .field("selectors", &self.selectors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reports_missing_container() {
        let document = Arc::new(MemoryDocument::new());
        document.insert_toggle_control("#expandBtn");

        let adapter = ElementAdapter::new(document, ElementSelectors::default());
        match adapter.resolve() {
            Err(ElementError::Missing { role, selector }) => {
                assert_eq!(role, ElementRole::Container);
                assert_eq!(selector, ".container");
            }
            Ok(_) => panic!("expected missing container"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_reports_missing_control() {
        let document = Arc::new(MemoryDocument::new());
        document.insert_container(".container");

        let adapter = ElementAdapter::new(document, ElementSelectors::default());
        let err = adapter.resolve().err().unwrap();
        assert_eq!(
            err,
            ElementError::missing(ElementRole::ToggleControl, "#expandBtn")
        );
        assert_eq!(
            err.to_string(),
            "required toggle control element '#expandBtn' not found"
        );
    }

    #[test]
    fn test_enumerate_assigns_ordinals_in_document_order() {
        let document = Arc::new(MemoryDocument::route_panel(3));
        let adapter = ElementAdapter::new(document.clone(), ElementSelectors::default());

        let items = adapter.enumerate_items();
        let ids: Vec<String> = items.iter().map(|i| i.handle().id()).collect();
        let ordinals: Vec<usize> = items.iter().map(DisclosureItem::ordinal).collect();
        assert_eq!(ids, ["stop-1", "stop-2", "stop-3"]);
        assert_eq!(ordinals, [0, 1, 2]);

        assert!(document.remove_item("stop-2"));
        let items = adapter.enumerate_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].handle().id(), "stop-3");
        assert_eq!(items[1].ordinal(), 1);
    }

    #[test]
    fn test_items_only_match_their_selector() {
        let document = Arc::new(MemoryDocument::route_panel(2));
        let selectors = ElementSelectors {
            items: ".stop.optional".to_string(),
            ..ElementSelectors::default()
        };

        let adapter = ElementAdapter::new(document, selectors);
        assert!(adapter.enumerate_items().is_empty());
    }
}
