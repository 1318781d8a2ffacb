//! Per-item transition executor.

use std::time::Duration;

use tracing::trace;
use twbus_core::logging::targets;

use super::VisualState;
use crate::element::DisclosureItem;
use crate::error::AnimationFault;

/// Performs single-item reveal and hide transitions.
///
/// The driver only sequences visual states and waits out their timing; the
/// interpolation itself belongs to whatever renders the item, guided by the
/// [`TransitionStyle`](super::TransitionStyle) installed on it.
#[derive(Debug, Clone, Copy)]
pub struct AnimationDriver {
    duration: Duration,
}

impl AnimationDriver {
    /// Create a driver whose transitions take `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The transition duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Reveal `item` after `delay`.
    ///
    /// The item enters layout in its staged state, pending styles are flushed,
    /// and then the shown state is applied so the renderer animates between
    /// the two. Resolves once the transition duration has elapsed. An item that
    /// is already shown resolves without another transition.
    pub async fn reveal(&self, item: &DisclosureItem, delay: Duration) -> Result<(), AnimationFault> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let handle = item.handle();
        let fault = |source| AnimationFault::Element {
            ordinal: item.ordinal(),
            source,
        };

        if handle.visual_state().map_err(fault)? == VisualState::Shown {
            trace!(target: targets::ANIMATION, ordinal = item.ordinal(), "item already shown");
            return Ok(());
        }

        handle.apply_visual_state(VisualState::Staged).map_err(fault)?;
        handle.flush_layout().map_err(fault)?;
        handle.apply_visual_state(VisualState::Shown).map_err(fault)?;
        trace!(target: targets::ANIMATION, ordinal = item.ordinal(), ?delay, "reveal started");

        tokio::time::sleep(self.duration).await;
        Ok(())
    }

    /// Hide `item`.
    ///
    /// The item fades to its staged state at once and leaves layout when the
    /// transition duration has elapsed. Resolves after it has left layout. An
    /// item that is already hidden resolves immediately.
    pub async fn hide(&self, item: &DisclosureItem) -> Result<(), AnimationFault> {
        let handle = item.handle();
        let fault = |source| AnimationFault::Element {
            ordinal: item.ordinal(),
            source,
        };

        if handle.visual_state().map_err(fault)? == VisualState::Hidden {
            trace!(target: targets::ANIMATION, ordinal = item.ordinal(), "item already hidden");
            return Ok(());
        }

        handle.apply_visual_state(VisualState::Staged).map_err(fault)?;
        tokio::time::sleep(self.duration).await;
        handle.apply_visual_state(VisualState::Hidden).map_err(fault)?;
        trace!(target: targets::ANIMATION, ordinal = item.ordinal(), "item hidden");
        Ok(())
    }

    /// Put `item` into `state` at once, without a transition.
    pub fn snap(&self, item: &DisclosureItem, state: VisualState) -> Result<(), AnimationFault> {
        item.handle()
            .apply_visual_state(state)
            .map_err(|source| AnimationFault::Element {
                ordinal: item.ordinal(),
                source,
            })
    }
}
