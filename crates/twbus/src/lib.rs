//! TwBus route panel disclosure.
//!
//! This crate drives the expand/collapse disclosure of a bus route panel: a
//! toggle control reveals the route's extra stops one after another and hides
//! them again, all at once.
//!
//! - **Disclosure Controller**: owns the expanded/animating state, serializes
//!   toggle requests and sequences transitions ([`DisclosureController`])
//! - **Animation Driver**: single-item reveal and hide ([`animation`])
//! - **Element Adapter**: resolves the panel's elements from a host document
//!   ([`element`])
//! - **Accessibility**: the control's glyph and localized accessible name
//!   ([`accessibility`])
//! - **Input**: click, key and swipe mapping ([`input`])
//! - **Configuration**: timings, thresholds, labels and selectors
//!   ([`DisclosureConfig`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use twbus::element::MemoryDocument;
//! use twbus::{DisclosureConfig, DisclosureController, DisclosureEvent};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let document = Arc::new(MemoryDocument::route_panel(3));
//! let controller = DisclosureController::new(document.clone(), DisclosureConfig::default());
//!
//! controller.events().connect(|event| {
//!     if let DisclosureEvent::Settled { expanded } = event {
//!         println!("route panel settled, expanded: {expanded}");
//!     }
//! });
//!
//! controller.initialize();
//! document.first_toggle_control().unwrap().click();
//! assert!(controller.get_state().expanded);
//!
//! tokio::time::sleep(Duration::from_millis(500)).await;
//! assert!(!controller.get_state().animating);
//! # }
//! ```

pub mod accessibility;
pub mod animation;
pub mod config;
pub mod disclosure;
pub mod element;
pub mod error;
pub mod input;

pub use accessibility::{AccessibleRole, Affordance, AffordanceLabels, Glyph};
pub use config::{DisclosureConfig, ElementSelectors};
pub use disclosure::{
    DisclosureController, DisclosureEvent, DisclosurePhase, DisclosureState, RejectReason,
};
pub use error::{AnimationFault, ConfigError, ElementError, InitError};
pub use input::{RequestSource, ToggleRequest};
