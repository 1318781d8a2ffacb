//! Visual states of a disclosure item.

use std::time::Duration;

use super::easing::{Easing, lerp_eased};

/// The three visual states an item moves through.
///
/// A reveal walks `Hidden -> Staged -> Shown`; a hide walks the same path
/// backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Suppressed from layout (`display: none`).
    #[default]
    Hidden,
    /// In layout, transparent and offset: the "before" side of a transition.
    Staged,
    /// In layout, fully opaque, at its resting position.
    Shown,
}

impl VisualState {
    /// Whether the item participates in layout in this state.
    pub fn in_layout(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// The concrete style for this state.
    pub fn style(self, hidden_offset_px: f32) -> VisualStyle {
        match self {
            Self::Hidden => VisualStyle {
                displayed: false,
                opacity: 0.0,
                offset_x: hidden_offset_px,
            },
            Self::Staged => VisualStyle {
                displayed: true,
                opacity: 0.0,
                offset_x: hidden_offset_px,
            },
            Self::Shown => VisualStyle {
                displayed: true,
                opacity: 1.0,
                offset_x: 0.0,
            },
        }
    }
}

/// Concrete style values applied to an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    /// Whether the item participates in layout.
    pub displayed: bool,
    /// Opacity from 0.0 to 1.0.
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
}

impl VisualStyle {
    /// Render the offset as a CSS transform.
    pub fn css_transform(&self) -> String {
        format!("translateX({}px)", self.offset_x)
    }
}

/// How an item transitions between visual states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStyle {
    /// Duration of the opacity/transform transition.
    pub duration: Duration,
    /// Easing curve of the transition.
    pub easing: Easing,
    /// Horizontal offset of the staged and hidden states.
    pub hidden_offset_px: f32,
}

impl TransitionStyle {
    /// Render as a CSS `transition` shorthand.
    pub fn css(&self) -> String {
        let ms = self.duration.as_millis();
        let easing = self.easing.css_name();
        format!("opacity {ms}ms {easing}, transform {ms}ms {easing}")
    }

    /// Style of an item `t` (0.0 to 1.0) of the way from `from` to `to`.
    ///
    /// Layout participation is not interpolated: an item is displayed for the
    /// whole transition whenever either end is displayed.
    pub fn sample(&self, from: VisualState, to: VisualState, t: f32) -> VisualStyle {
        let a = from.style(self.hidden_offset_px);
        let b = to.style(self.hidden_offset_px);
        let displayed = if t >= 1.0 {
            b.displayed
        } else {
            a.displayed || b.displayed
        };
        VisualStyle {
            displayed,
            opacity: lerp_eased(self.easing, a.opacity, b.opacity, t),
            offset_x: lerp_eased(self.easing, a.offset_x, b.offset_x, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TransitionStyle {
        TransitionStyle {
            duration: Duration::from_millis(300),
            easing: Easing::Linear,
            hidden_offset_px: -20.0,
        }
    }

    #[test]
    fn test_layout_participation() {
        assert!(!VisualState::Hidden.in_layout());
        assert!(VisualState::Staged.in_layout());
        assert!(VisualState::Shown.in_layout());
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(
            style().css(),
            "opacity 300ms linear, transform 300ms linear"
        );
        assert_eq!(
            VisualState::Shown.style(-20.0).css_transform(),
            "translateX(0px)"
        );
        assert_eq!(
            VisualState::Staged.style(-20.0).css_transform(),
            "translateX(-20px)"
        );
    }

    #[test]
    fn test_sample_midway() {
        let mid = style().sample(VisualState::Staged, VisualState::Shown, 0.5);
        assert!(mid.displayed);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.offset_x, -10.0);
    }

    #[test]
    fn test_sample_hide_ends_out_of_layout() {
        let s = style();
        assert!(s.sample(VisualState::Staged, VisualState::Hidden, 0.9).displayed);
        assert!(!s.sample(VisualState::Staged, VisualState::Hidden, 1.0).displayed);
    }
}
