//! Animation driver and transition primitives.
//!
//! Each disclosure item moves between three [`VisualState`]s. The
//! [`AnimationDriver`] performs one item's timed transition and resolves once
//! the item has visually settled; it keeps no state between calls.
//!
//! # Easing Functions
//!
//! Easing functions control the rate of change during a transition. They take
//! a normalized progress value `t` (0.0 to 1.0) and return a transformed value.
//!
//! # Example
//!
//! ```
//! use twbus::animation::{ease, Easing};
//!
//! let eased = ease(Easing::EaseOut, 0.5);
//! assert!(eased > 0.5);
//! ```

mod driver;
mod easing;
mod visual;

pub use driver::AnimationDriver;
pub use easing::{Easing, ease, lerp_eased};
pub use visual::{TransitionStyle, VisualState, VisualStyle};
