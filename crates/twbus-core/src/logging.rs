//! Logging facilities for TwBus.
//!
//! TwBus uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Use the constants in [`targets`] with `tracing` directives (for example
//! `RUST_LOG=twbus::disclosure=debug`) to filter logs by subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "twbus_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "twbus_core::signal";
    /// Disclosure controller target.
    pub const DISCLOSURE: &str = "twbus::disclosure";
    /// Animation driver target.
    pub const ANIMATION: &str = "twbus::animation";
    /// Element adapter target.
    pub const ELEMENT: &str = "twbus::element";
    /// Input mapping target.
    pub const INPUT: &str = "twbus::input";
}

/// Span names used by TwBus.
pub mod span_names {
    /// A single toggle transition, from acceptance to settle.
    pub const TRANSITION: &str = "twbus::transition";
}
