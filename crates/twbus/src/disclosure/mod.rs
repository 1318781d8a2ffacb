//! Disclosure state machine.
//!
//! The [`DisclosureController`] is the single authority over whether the
//! panel is expanded and the only component that changes item visibility.

mod controller;
mod state;

pub use controller::DisclosureController;
pub use state::{DisclosureEvent, DisclosurePhase, DisclosureState, RejectReason};
