use std::time::Duration;

use super::TimingFunction;

/// Generation token identifying one playback.
///
/// The controller hands out a fresh id whenever it replaces its playback, so
/// a finish reported for an older id can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackId(pub u64);

/// Result of advancing a playback by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackStep {
    /// Nothing is playing (scrubbing, paused, cancelled or already finished)
    Idle,
    /// Still playing, with the new value
    Running(f32),
    /// Reached the end of the run, with the final value. Reported once.
    Finished(f32),
}

/// One timed run from a start fraction to an end fraction
#[derive(Debug, Clone)]
struct Run {
    start: f32,
    end: f32,
    duration: Duration,
    elapsed: Duration,
    timing: TimingFunction,
    paused: bool,
}

/// Scrubbable animation of a value between two endpoints.
///
/// The position is a play fraction where 0 maps to `from_value` and 1 to
/// `to_value`. The fraction may be driven directly with
/// [`scrub_to_fraction`](Self::scrub_to_fraction) or played over time with
/// [`play`](Self::play) and [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct Playback {
    id: PlaybackId,
    from_value: f32,
    to_value: f32,
    /// Last requested fraction, unclamped
    fraction: f32,
    run: Option<Run>,
}

impl Playback {
    pub fn new(id: PlaybackId, from_value: f32, to_value: f32) -> Self {
        Self {
            id,
            from_value,
            to_value,
            fraction: 0.0,
            run: None,
        }
    }

    pub fn id(&self) -> PlaybackId {
        self.id
    }

    pub fn from_value(&self) -> f32 {
        self.from_value
    }

    pub fn to_value(&self) -> f32 {
        self.to_value
    }

    /// Move to a fraction immediately, dropping any timed run.
    /// Values outside `[0, 1]` are remembered but applied clamped.
    pub fn scrub_to_fraction(&mut self, fraction: f32) -> f32 {
        self.run = None;
        self.fraction = fraction;
        self.value()
    }

    /// The last requested fraction, which may lie outside `[0, 1]`
    pub fn progress_fraction(&self) -> f32 {
        self.fraction
    }

    /// The value at the current fraction, clamped to the endpoints
    pub fn value(&self) -> f32 {
        let t = self.fraction.clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to_value;
        }
        self.from_value + (self.to_value - self.from_value) * t
    }

    /// Start a timed run from `start` to `end`. Replaces any run in progress.
    pub fn play(&mut self, start: f32, end: f32, duration: Duration, timing: TimingFunction) {
        self.fraction = start;
        self.run = Some(Run {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            timing,
            paused: false,
        });
    }

    /// Freeze the timed run at its current fraction
    pub fn pause(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.paused = true;
        }
    }

    /// Stop for good. A cancelled playback never reports `Finished`.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    /// Advance the timed run by `dt`
    pub fn advance(&mut self, dt: Duration) -> PlaybackStep {
        let Some(run) = self.run.as_mut() else {
            return PlaybackStep::Idle;
        };
        if run.paused {
            return PlaybackStep::Idle;
        }

        run.elapsed += dt;
        if run.elapsed >= run.duration {
            self.fraction = run.end;
            self.run = None;
            return PlaybackStep::Finished(self.value());
        }

        let t = run.elapsed.as_secs_f32() / run.duration.as_secs_f32();
        let eased = run.timing.evaluate(t);
        self.fraction = run.start + (run.end - run.start) * eased;
        PlaybackStep::Running(self.value())
    }
}
