//! Core primitives for TwBus.
//!
//! This crate provides the building blocks the disclosure panel is made of:
//!
//! - **Signal/Slot System**: Type-safe observer lists ([`Signal`])
//! - **Property System**: Value cells with change detection ([`Property`])
//! - **Logging**: `tracing` target names for filtering ([`logging::targets`])
//!
//! # Example
//!
//! ```
//! use twbus_core::{Property, Signal};
//!
//! let label = Property::new("Expand route".to_string());
//! let label_changed = Signal::<String>::new();
//!
//! label_changed.connect(|text| println!("label is now {text}"));
//!
//! if label.set("Collapse route".to_string()) {
//!     label_changed.emit(label.get());
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionId, Signal};
