//! Pure conversions between drag displacement, progress and time.

use std::time::Duration;

use crate::config::SettleTiming;

/// Clamp a progress value into `[0, 1]`.
///
/// Every progress value a host observes passes through here.
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Multiplier for a release against a blocked fling, in `[2, 6]`
pub fn blocked_fling_duration_factor(velocity: f32) -> u32 {
    (velocity.abs() / 2.0).clamp(2.0, 6.0) as u32
}

/// Displacement/velocity to progress/duration conversions
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressClock {
    settle: SettleTiming,
}

impl ProgressClock {
    pub fn new(settle: SettleTiming) -> Self {
        Self { settle }
    }

    /// Progress gained per pixel of drag between two endpoint progresses.
    ///
    /// The sign follows the direction of travel. When both endpoints sit at
    /// the same pixel offset the full range is used instead.
    pub fn progress_per_unit_displacement(
        &self,
        from_progress: f32,
        to_progress: f32,
        shift_range: f32,
    ) -> f32 {
        let start_shift = from_progress * shift_range;
        let end_shift = to_progress * shift_range;
        let mut total_shift = end_shift - start_shift;
        if total_shift == 0.0 {
            total_shift = shift_range;
        }
        1.0 / total_shift
    }

    /// How long to settle across `remaining` progress after a release at
    /// `velocity` px/ms. Zero distance settles instantly.
    pub fn settle_duration(&self, velocity: f32, remaining: f32) -> Duration {
        if !(remaining > 0.0) {
            return Duration::ZERO;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let divisor = (velocity.abs() * 0.5).max(self.settle.min_velocity_divisor);
        let travel = remaining.min(1.0).max(self.settle.min_travel);
        let secs = self.settle.base.as_secs_f32() / divisor * travel;
        match Duration::try_from_secs_f32(secs) {
            Ok(duration) => duration.max(self.settle.min),
            Err(_) => {
                log::warn!("settle duration {}s out of range, using the maximum", secs);
                self.max_settle_duration()
            }
        }
    }

    /// Longest duration [`settle_duration`](Self::settle_duration) can return
    pub fn max_settle_duration(&self) -> Duration {
        let secs = self.settle.base.as_secs_f32() / self.settle.min_velocity_divisor;
        Duration::try_from_secs_f32(secs)
            .unwrap_or(self.settle.base)
            .max(self.settle.min)
    }
}
