//! Timing functions (easing curves) for settle and close animations.
//!
//! A timing function maps normalized time `t` in `[0, 1]` to a normalized
//! play position. All built-in curves map 0 to 0 and 1 to 1.
//!
//! ## Built-in Curves
//!
//! - [`TimingFunction::Linear`] - Constant speed, used while scrubbing
//! - [`TimingFunction::EaseOut`] - Quadratic deceleration
//! - [`TimingFunction::Decelerate`] - `1 - (1 - t)^(2 * factor)`
//! - [`TimingFunction::Scroll`] - Quintic deceleration for fast releases
//! - [`TimingFunction::ScrollCubic`] - Cubic deceleration for slow releases
//! - [`TimingFunction::Custom`] - User-defined function

use std::sync::Arc;

/// Release speed (px/ms) above which the quintic scroll curve is used
pub const FAST_FLING_VELOCITY: f32 = 10.0;

/// Timing function that controls the animation curve
#[derive(Clone)]
pub enum TimingFunction {
    /// Linear interpolation (constant speed)
    Linear,
    /// Starts fast, ends slow
    EaseOut,
    /// Deceleration with a configurable strength, `1.0` being a quadratic ease-out
    Decelerate(f32),
    /// Quintic ease-out
    Scroll,
    /// Cubic ease-out
    ScrollCubic,
    /// Custom timing function
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the timing function at time t (0.0 to 1.0)
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::Decelerate(factor) => decelerate(t, *factor),
            TimingFunction::Scroll => {
                let t = t - 1.0;
                t * t * t * t * t + 1.0
            }
            TimingFunction::ScrollCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Pick the settle curve for a release velocity in px/ms
    pub fn for_velocity(velocity: f32) -> Self {
        if velocity.abs() > FAST_FLING_VELOCITY {
            TimingFunction::Scroll
        } else {
            TimingFunction::ScrollCubic
        }
    }

    /// Create a custom timing function from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::Decelerate(factor) => write!(f, "Decelerate({})", factor),
            TimingFunction::Scroll => write!(f, "Scroll"),
            TimingFunction::ScrollCubic => write!(f, "ScrollCubic"),
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn decelerate(t: f32, factor: f32) -> f32 {
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_curves_hit_endpoints() {
        let curves = [
            TimingFunction::EaseOut,
            TimingFunction::Decelerate(1.5),
            TimingFunction::Scroll,
            TimingFunction::ScrollCubic,
        ];
        for curve in curves {
            assert!(curve.evaluate(0.0).abs() < 1e-6, "{:?} at 0", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_decelerating_curves_lead_linear() {
        assert!(TimingFunction::Decelerate(1.5).evaluate(0.5) > 0.5);
        assert!(TimingFunction::Scroll.evaluate(0.5) > TimingFunction::ScrollCubic.evaluate(0.5));
    }

    #[test]
    fn test_for_velocity() {
        assert!(matches!(
            TimingFunction::for_velocity(-12.0),
            TimingFunction::Scroll
        ));
        assert!(matches!(
            TimingFunction::for_velocity(3.0),
            TimingFunction::ScrollCubic
        ));
    }
}
