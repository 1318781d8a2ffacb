//! Easing curves for item transitions.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value. The driver hands the curve to each item as part of its
//! [`TransitionStyle`](super::TransitionStyle); hosts that interpolate frames
//! themselves can sample it with [`ease`].

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    #[default]
    EaseOut,
    /// Quadratic ease-in-out (smooth start and end).
    EaseInOut,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
}

impl Easing {
    /// The CSS `transition-timing-function` keyword closest to this curve.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut | Self::EaseOutCubic => "ease-out",
            Self::EaseInOut | Self::EaseInOutSine => "ease-in-out",
        }
    }
}

/// Apply an easing function to a progress value.
///
/// # Example
///
/// ```
/// use twbus::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
    }
}

/// Interpolate between two values using an easing function.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutCubic,
        Easing::EaseInOutSine,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(ease(easing, 0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((ease(easing, 1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(ease(Easing::EaseOut, -1.0), 0.0);
        assert_eq!(ease(Easing::EaseOut, 2.0), 1.0);
    }

    #[test]
    fn test_lerp_eased() {
        assert_eq!(lerp_eased(Easing::Linear, -20.0, 0.0, 0.5), -10.0);
        assert_eq!(lerp_eased(Easing::EaseOut, 0.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_css_names() {
        assert_eq!(Easing::default().css_name(), "ease-out");
        assert_eq!(Easing::EaseInOutSine.css_name(), "ease-in-out");
    }
}
