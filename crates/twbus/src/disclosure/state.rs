//! Disclosure state, lifecycle events and rejection reasons.

use std::fmt;

use crate::error::{AnimationFault, InitError};
use crate::input::ToggleRequest;

/// Phase of the disclosure state machine.
///
/// ```text
/// Collapsed --accept--> Expanding --settle--> Expanded
/// Expanded  --accept--> Collapsing --settle--> Collapsed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisclosurePhase {
    /// Idle with the items hidden.
    #[default]
    Collapsed,
    /// Items are being revealed.
    Expanding,
    /// Idle with the items shown.
    Expanded,
    /// Items are being hidden.
    Collapsing,
}

impl DisclosurePhase {
    /// The logical expanded flag. It reflects the target of a running
    /// transition, not its visual progress.
    pub fn is_expanded(self) -> bool {
        matches!(self, Self::Expanding | Self::Expanded)
    }

    /// Whether a transition is running.
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Expanding | Self::Collapsing)
    }

    /// The transition an accepted toggle starts from this idle phase.
    pub fn begin_toggle(self) -> Self {
        if self.is_expanded() {
            Self::Collapsing
        } else {
            Self::Expanding
        }
    }

    /// The idle phase a running transition settles into.
    pub fn settled(self) -> Self {
        match self {
            Self::Expanding => Self::Expanded,
            Self::Collapsing => Self::Collapsed,
            idle => idle,
        }
    }
}

impl fmt::Display for DisclosurePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Collapsed => "collapsed",
            Self::Expanding => "expanding",
            Self::Expanded => "expanded",
            Self::Collapsing => "collapsing",
        };
        f.write_str(name)
    }
}

/// Read-only snapshot of the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisclosureState {
    /// Logical expanded flag; flips when a toggle is accepted.
    pub expanded: bool,
    /// Whether a transition is running.
    pub animating: bool,
    /// Items enumerated by the most recent toggle, or by initialization.
    pub item_count: usize,
    /// Current phase.
    pub phase: DisclosurePhase,
}

impl DisclosureState {
    pub(crate) fn new(phase: DisclosurePhase, item_count: usize) -> Self {
        Self {
            expanded: phase.is_expanded(),
            animating: phase.is_animating(),
            item_count,
            phase,
        }
    }
}

/// Why a toggle request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The controller is not bound to its elements.
    NotInitialized,
    /// A transition is already running.
    Redundant,
    /// The request arrived inside the refractory window.
    TooFast,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "controller not initialized"),
            Self::Redundant => write!(f, "transition already running"),
            Self::TooFast => write!(f, "inside refractory window"),
        }
    }
}

/// Lifecycle events emitted by a [`DisclosureController`](super::DisclosureController).
#[derive(Debug, Clone, PartialEq)]
pub enum DisclosureEvent {
    /// The controller bound to its elements.
    Initialized { item_count: usize },
    /// Binding failed; the controller stays inert.
    InitializationFailed(InitError),
    /// A toggle was accepted and its transition started.
    ToggleAccepted {
        request: ToggleRequest,
        phase: DisclosurePhase,
    },
    /// A toggle request was dropped.
    ToggleRejected {
        request: ToggleRequest,
        reason: RejectReason,
    },
    /// One item finished its part of the running transition.
    ItemSettled { ordinal: usize },
    /// The running transition settled.
    Settled { expanded: bool },
    /// A fault was caught during a transition.
    Fault(AnimationFault),
    /// Bindings were released.
    TornDown,
}
