//! Reactive value cells.
//!
//! [`Property<T>`] wraps a value and reports whether a `set` actually changed
//! it, so the owner can decide whether to emit a change notification.
//!
//! # Example
//!
//! ```
//! use twbus_core::{Property, Signal};
//!
//! struct Marker {
//!     expanded: Property<bool>,
//!     expanded_changed: Signal<bool>,
//! }
//!
//! impl Marker {
//!     fn set_expanded(&self, expanded: bool) {
//!         if self.expanded.set(expanded) {
//!             self.expanded_changed.emit(expanded);
//!         }
//!     }
//! }
//!
//! let marker = Marker { expanded: Property::new(false), expanded_changed: Signal::new() };
//! marker.set_expanded(true);
//! assert!(marker.expanded.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell with change detection.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
