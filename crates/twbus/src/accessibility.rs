//! Accessibility and affordance of the toggle control.
//!
//! The control always advertises the action it will perform next: while the
//! panel is collapsed it shows the "expand" glyph and name, and while expanded
//! the "collapse" glyph and name.

use serde::{Deserialize, Serialize};

/// Accessibility role assigned to the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// A push button.
    Button,
}

impl AccessibleRole {
    /// The ARIA role name.
    pub fn aria_name(self) -> &'static str {
        match self {
            Self::Button => "button",
        }
    }
}

/// The two icon glyphs the control can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Shown while collapsed.
    Expand,
    /// Shown while expanded.
    Collapse,
}

impl Glyph {
    /// Icon font class of this glyph.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Expand => "fas fa-expand",
            Self::Collapse => "fas fa-compress",
        }
    }

    /// Icon markup, hidden from assistive technology.
    pub fn icon_markup(self) -> String {
        format!("<i class=\"{}\" aria-hidden=\"true\"></i>", self.css_class())
    }
}

/// Accessible names of the control, one per next action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordanceLabels {
    /// Name while the panel is collapsed.
    pub expand: String,
    /// Name while the panel is expanded.
    pub collapse: String,
}

impl AffordanceLabels {
    /// English labels.
    pub fn english() -> Self {
        Self {
            expand: "Expand route".to_string(),
            collapse: "Collapse route".to_string(),
        }
    }

    /// Brazilian Portuguese labels.
    pub fn portuguese() -> Self {
        Self {
            expand: "Expandir rota".to_string(),
            collapse: "Contrair rota".to_string(),
        }
    }
}

impl Default for AffordanceLabels {
    fn default() -> Self {
        Self::english()
    }
}

/// Everything the control displays for one panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    /// Icon glyph.
    pub glyph: Glyph,
    /// Accessible name, also used as the tooltip.
    pub label: String,
    /// Whether the panel is (logically) expanded.
    pub expanded: bool,
}

impl Affordance {
    /// The affordance for a panel whose logical state is `expanded`.
    pub fn for_state(expanded: bool, labels: &AffordanceLabels) -> Self {
        if expanded {
            Self {
                glyph: Glyph::Collapse,
                label: labels.collapse.clone(),
                expanded,
            }
        } else {
            Self {
                glyph: Glyph::Expand,
                label: labels.expand.clone(),
                expanded,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordance_names_next_action() {
        let labels = AffordanceLabels::english();

        let collapsed = Affordance::for_state(false, &labels);
        assert_eq!(collapsed.glyph, Glyph::Expand);
        assert_eq!(collapsed.label, "Expand route");

        let expanded = Affordance::for_state(true, &labels);
        assert_eq!(expanded.glyph, Glyph::Collapse);
        assert_eq!(expanded.label, "Collapse route");
    }

    #[test]
    fn test_localized_labels() {
        let labels = AffordanceLabels::portuguese();
        assert_eq!(Affordance::for_state(true, &labels).label, "Contrair rota");
    }

    #[test]
    fn test_icon_markup() {
        assert_eq!(
            Glyph::Collapse.icon_markup(),
            "<i class=\"fas fa-compress\" aria-hidden=\"true\"></i>"
        );
        assert_eq!(AccessibleRole::Button.aria_name(), "button");
    }
}
