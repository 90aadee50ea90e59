//! Tunables for the feed controller.
//!
//! All values have sensible defaults matching a phone-sized horizontal panel.
//! Use the builder-style setters to override individual values and
//! [`FeedConfig::validate`] (called by the controller on construction) to
//! reject values that cannot be clamped into something meaningful.

use std::time::Duration;

use thiserror::Error;

use crate::animation::TimingFunction;

/// Errors reported when building a controller or a state graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("shift range must be a positive finite number of pixels, got {0}")]
    InvalidShiftRange(f32),
    #[error("success threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f32),
    #[error("touch slop must be a positive finite number of pixels, got {0}")]
    InvalidTouchSlop(f32),
    #[error("release velocity must be positive and finite, got {0} px/ms")]
    InvalidReleaseVelocity(f32),
    #[error("settle base duration must be non-zero, got {0:?}")]
    InvalidSettleBase(Duration),
    #[error("settle velocity divisor must be positive and finite, got {0}")]
    InvalidVelocityDivisor(f32),
    #[error("settle minimum travel must lie in (0, 1], got {0}")]
    InvalidMinTravel(f32),
    #[error("velocity dampening must be non-zero")]
    InvalidVelocityDampening,
    #[error("state `{name}` has endpoint progress {progress} outside [0, 1]")]
    StateOutOfRange { name: &'static str, progress: f32 },
    #[error("state `{0}` has an edge pointing back to itself")]
    SelfLoop(&'static str),
    #[error("state `{0}` has more than one edge in the same direction")]
    DuplicateEdge(&'static str),
    #[error("two different states share the name `{0}`")]
    DuplicateName(&'static str),
}

/// Constants for turning release velocity and remaining distance into a
/// settle duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleTiming {
    /// Duration of a full-distance settle at the minimum velocity divisor
    pub base: Duration,
    /// Lower bound for any non-zero settle
    pub min: Duration,
    /// Remaining distances below this are treated as this distance
    pub min_travel: f32,
    /// Floor for `|velocity| / 2`, i.e. the slowest assumed release
    pub min_velocity_divisor: f32,
}

impl Default for SettleTiming {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(1200),
            min: Duration::from_millis(100),
            min_travel: 0.2,
            min_velocity_divisor: 2.0,
        }
    }
}

/// Configuration for [`FeedController`](crate::FeedController)
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Distance in pixels the panel travels between progress 0 and 1
    pub shift_range: f32,
    /// Eased progress above which a non-fling release completes the transition
    pub success_threshold: f32,
    /// Length of one frame, used to project release velocity one frame ahead
    pub single_frame: Duration,
    /// Settle duration tuning
    pub settle: SettleTiming,
    /// Default duration for an animated programmatic close
    pub close_duration: Duration,
    /// Curve for an animated programmatic close
    pub close_timing: TimingFunction,
    /// Curve applied to the scrubbed fraction before the threshold test
    pub scrub_timing: TimingFunction,
    /// Movement in pixels before a touch becomes a drag
    pub touch_slop: f32,
    /// Release velocity (px/ms) above which a release counts as a fling
    pub release_velocity: f32,
    /// Time constant of the velocity low-pass filter
    pub velocity_dampening: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            shift_range: 1080.0,
            success_threshold: 0.5,
            single_frame: Duration::from_millis(16),
            settle: SettleTiming::default(),
            close_duration: Duration::from_millis(350),
            close_timing: TimingFunction::Decelerate(1.5),
            scrub_timing: TimingFunction::Linear,
            touch_slop: 8.0,
            release_velocity: 1.0,
            // 1000 / (2 * pi * 10) ms, a 10Hz cutoff
            velocity_dampening: Duration::from_micros(15_915),
        }
    }
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift_range(mut self, shift_range: f32) -> Self {
        self.shift_range = shift_range;
        self
    }

    pub fn success_threshold(mut self, threshold: f32) -> Self {
        self.success_threshold = threshold;
        self
    }

    pub fn settle(mut self, settle: SettleTiming) -> Self {
        self.settle = settle;
        self
    }

    pub fn close_duration(mut self, duration: Duration) -> Self {
        self.close_duration = duration;
        self
    }

    pub fn close_timing(mut self, timing: TimingFunction) -> Self {
        self.close_timing = timing;
        self
    }

    pub fn scrub_timing(mut self, timing: TimingFunction) -> Self {
        self.scrub_timing = timing;
        self
    }

    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn release_velocity(mut self, velocity: f32) -> Self {
        self.release_velocity = velocity;
        self
    }

    pub fn velocity_dampening(mut self, dampening: Duration) -> Self {
        self.velocity_dampening = dampening;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.shift_range) {
            return Err(ConfigError::InvalidShiftRange(self.shift_range));
        }
        if !(self.success_threshold > 0.0 && self.success_threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(self.success_threshold));
        }
        if !is_positive(self.touch_slop) {
            return Err(ConfigError::InvalidTouchSlop(self.touch_slop));
        }
        if !is_positive(self.release_velocity) {
            return Err(ConfigError::InvalidReleaseVelocity(self.release_velocity));
        }
        self.settle.validate()?;
        if self.velocity_dampening.is_zero() {
            return Err(ConfigError::InvalidVelocityDampening);
        }
        Ok(())
    }
}

impl SettleTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base.is_zero() {
            return Err(ConfigError::InvalidSettleBase(self.base));
        }
        if !is_positive(self.min_velocity_divisor) {
            return Err(ConfigError::InvalidVelocityDivisor(
                self.min_velocity_divisor,
            ));
        }
        if !(self.min_travel > 0.0 && self.min_travel <= 1.0) {
            return Err(ConfigError::InvalidMinTravel(self.min_travel));
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FeedConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_shift_range() {
        let config = FeedConfig::new().shift_range(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidShiftRange(0.0)));

        let config = FeedConfig::new().shift_range(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_threshold_at_bounds() {
        assert!(FeedConfig::new().success_threshold(0.0).validate().is_err());
        assert!(FeedConfig::new().success_threshold(1.0).validate().is_err());
        assert!(FeedConfig::new().success_threshold(0.3).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_settle_timing() {
        let settle = |settle: SettleTiming| FeedConfig::new().settle(settle).validate();

        assert_eq!(
            settle(SettleTiming {
                base: Duration::ZERO,
                ..SettleTiming::default()
            }),
            Err(ConfigError::InvalidSettleBase(Duration::ZERO))
        );
        assert_eq!(
            settle(SettleTiming {
                min_velocity_divisor: 0.0,
                ..SettleTiming::default()
            }),
            Err(ConfigError::InvalidVelocityDivisor(0.0))
        );
        assert!(settle(SettleTiming {
            min_velocity_divisor: f32::INFINITY,
            ..SettleTiming::default()
        })
        .is_err());
        assert_eq!(
            settle(SettleTiming {
                min_travel: 0.0,
                ..SettleTiming::default()
            }),
            Err(ConfigError::InvalidMinTravel(0.0))
        );
        assert_eq!(
            settle(SettleTiming {
                min_travel: 1.5,
                ..SettleTiming::default()
            }),
            Err(ConfigError::InvalidMinTravel(1.5))
        );
        assert!(settle(SettleTiming {
            min_travel: 1.0,
            ..SettleTiming::default()
        })
        .is_ok());
    }

    #[test]
    fn test_rejects_zero_velocity_dampening() {
        let config = FeedConfig::new().velocity_dampening(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidVelocityDampening)
        );
    }

    #[test]
    fn test_error_messages_name_the_value() {
        let err = FeedConfig::new().touch_slop(-1.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "touch slop must be a positive finite number of pixels, got -1"
        );
    }
}
