//! Input events and their mapping to toggle requests.
//!
//! Three input sources can ask the panel to toggle: a primary click on the
//! control, an Enter/Space key press on the control, and a vertical swipe on
//! the container. Each is turned into a [`ToggleRequest`]; all other input is
//! ignored.

use tracing::trace;
use twbus_core::logging::targets;

/// Keys the control distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    /// Any other key.
    Other,
}

impl Key {
    /// Whether this key activates the control like a primary click.
    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Input delivered by the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    /// Primary pointer click.
    Click,
    /// Key pressed while the control has focus.
    KeyDown(Key),
}

impl ControlInput {
    /// The toggle request this input produces, if any.
    pub fn toggle_request(self) -> Option<ToggleRequest> {
        match self {
            Self::Click => Some(ToggleRequest::new(RequestSource::Pointer)),
            Self::KeyDown(key) if key.activates() => {
                Some(ToggleRequest::new(RequestSource::Keyboard))
            }
            Self::KeyDown(_) => None,
        }
    }
}

/// Input delivered by the panel container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerInput {
    /// A touch began at vertical position `y`.
    TouchStart { y: f32 },
    /// A touch ended at vertical position `y`.
    TouchEnd { y: f32 },
    /// The viewport was resized or rotated.
    ViewportChanged,
}

/// Direction of a vertical swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved towards the top of the screen.
    Up,
    /// Finger moved towards the bottom of the screen.
    Down,
}

impl SwipeDirection {
    /// Whether this swipe toggles a panel whose state is `expanded`.
    ///
    /// Swiping up only expands and swiping down only collapses.
    pub fn toggles(self, expanded: bool) -> bool {
        match self {
            Self::Up => !expanded,
            Self::Down => expanded,
        }
    }
}

/// Detects vertical swipes from touch start/end positions.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start_y: Option<f32>,
}

impl SwipeTracker {
    /// Create a tracker requiring more than `threshold` pixels of travel.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_y: None,
        }
    }

    /// Record the start of a touch.
    pub fn touch_start(&mut self, y: f32) {
        self.start_y = Some(y);
    }

    /// Finish a touch, returning the swipe it formed, if any.
    pub fn touch_end(&mut self, y: f32) -> Option<SwipeDirection> {
        let start = self.start_y.take()?;
        let delta = start - y;
        if delta.abs() <= self.threshold {
            trace!(target: targets::INPUT, delta, "touch below swipe threshold");
            return None;
        }
        Some(if delta > 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        })
    }
}

/// Where a toggle request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSource {
    Pointer,
    Keyboard,
    Swipe,
    /// `force_expand` / `force_collapse` or a direct call.
    Programmatic,
}

/// A request to toggle the panel now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleRequest {
    /// Origin of the request, for diagnostics.
    pub source: RequestSource,
}

impl ToggleRequest {
    /// Create a request from `source`.
    pub fn new(source: RequestSource) -> Self {
        Self { source }
    }

    /// A request issued by code rather than user input.
    pub fn programmatic() -> Self {
        Self::new(RequestSource::Programmatic)
    }
}

impl Default for ToggleRequest {
    fn default() -> Self {
        Self::programmatic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_keys() {
        assert_eq!(
            ControlInput::KeyDown(Key::Enter).toggle_request(),
            Some(ToggleRequest::new(RequestSource::Keyboard))
        );
        assert!(ControlInput::KeyDown(Key::Space).toggle_request().is_some());
        assert!(ControlInput::KeyDown(Key::Escape).toggle_request().is_none());
        assert!(ControlInput::KeyDown(Key::Other).toggle_request().is_none());
        assert_eq!(
            ControlInput::Click.toggle_request().map(|r| r.source),
            Some(RequestSource::Pointer)
        );
    }

    #[test]
    fn test_swipe_up_and_down() {
        let mut tracker = SwipeTracker::new(50.0);

        tracker.touch_start(400.0);
        assert_eq!(tracker.touch_end(300.0), Some(SwipeDirection::Up));

        tracker.touch_start(300.0);
        assert_eq!(tracker.touch_end(400.0), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_swipe_threshold_is_exclusive() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(50.0), None);

        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(49.0), Some(SwipeDirection::Up));
    }

    #[test]
    fn test_touch_end_without_start() {
        let mut tracker = SwipeTracker::new(50.0);
        assert_eq!(tracker.touch_end(0.0), None);

        // A touch end consumes its start.
        tracker.touch_start(500.0);
        assert_eq!(tracker.touch_end(300.0), Some(SwipeDirection::Up));
        assert_eq!(tracker.touch_end(0.0), None);
    }

    #[test]
    fn test_swipe_direction_gating() {
        assert!(SwipeDirection::Up.toggles(false));
        assert!(!SwipeDirection::Up.toggles(true));
        assert!(SwipeDirection::Down.toggles(true));
        assert!(!SwipeDirection::Down.toggles(false));
    }
}
