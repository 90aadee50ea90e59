//! Gesture-driven transition controller for a slide-in panel.
//!
//! The controller turns a stream of drag callbacks into progress between two
//! states of a [`StateGraph`] and decides, when the finger lifts, which state
//! to settle in:
//!
//! 1. `on_drag_start` picks (or resumes) the active transition.
//! 2. `on_drag` maps displacement to progress and retargets the transition
//!    whenever progress runs past either end.
//! 3. `on_drag_end` chooses the settle target from the fling direction or the
//!    progress threshold and starts the settle playback.
//! 4. `advance` ticks the playback; when it finishes the panel rests in the
//!    chosen state and any [`PendingCompletion`] is resolved.
//!
//! Programmatic operations (`close_now`, `close_animated`, scripted gestures)
//! go through the same state so that a gesture can always take over from them.

use std::time::Duration;

use crate::animation::{Playback, PlaybackId, PlaybackStep, TimingFunction};
use crate::clock::{blocked_fling_duration_factor, clamp_progress, ProgressClock};
use crate::config::{is_positive, ConfigError, FeedConfig};
use crate::detector::{DragEvent, SwipeDetector, SwipeDirections, TouchEvent};
use crate::fling_guard::FlingGuard;
use crate::handshake::PendingCompletion;
use crate::host::FeedHost;
use crate::state::{FeedState, StateGraph};

/// What the controller is doing right now
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// At rest in the current state
    Idle,
    /// A drag owns the progress
    Scrubbing,
    /// Animating toward a decided state
    Settling,
}

/// Endpoints of the active transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTransition {
    pub from: FeedState,
    pub to: FeedState,
}

/// Decoded close request flags: bit 0 animates, bits 2.. carry a duration in ms
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseRequest {
    pub animated: bool,
    pub duration: Option<Duration>,
}

impl CloseRequest {
    pub fn from_flags(flags: u32) -> Self {
        let millis = flags >> 2;
        Self {
            animated: flags & 1 != 0,
            duration: (millis != 0).then(|| Duration::from_millis(u64::from(millis))),
        }
    }
}

struct Transition {
    from: FeedState,
    to: FeedState,
    playback: Playback,
}

/// Where the running settle ends, and which playback it belongs to
#[derive(Clone, Copy, Debug)]
struct SettleAction {
    target: FeedState,
    playback: PlaybackId,
    user_driven: bool,
}

pub struct FeedController<H: FeedHost> {
    config: FeedConfig,
    graph: StateGraph,
    clock: ProgressClock,
    detector: SwipeDetector,
    host: H,

    phase: Phase,
    current_state: FeedState,
    gesture_origin: FeedState,
    transition: Option<Transition>,
    settle: Option<SettleAction>,
    pending: Option<PendingCompletion>,

    /// Last progress pushed to the host, always in [0, 1]
    progress: f32,
    /// Progress per pixel of drag; the sign is the direction toward `to`
    progress_multiplier: f32,
    displacement_shift: f32,
    start_progress: f32,
    last_fraction: f32,
    inside: bool,
    can_block_fling: bool,
    fling_guard: FlingGuard,

    next_playback: u64,
    scripted_position: Option<f32>,
}

impl<H: FeedHost> FeedController<H> {
    /// Controller for the closed/open panel
    pub fn new(config: FeedConfig, host: H) -> Result<Self, ConfigError> {
        Self::with_graph(config, StateGraph::two_state(), host)
    }

    pub fn with_graph(config: FeedConfig, graph: StateGraph, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let home = graph.home();
        Ok(Self {
            clock: ProgressClock::new(config.settle),
            detector: SwipeDetector::new(&config),
            config,
            graph,
            host,
            phase: Phase::Idle,
            current_state: home,
            gesture_origin: home,
            transition: None,
            settle: None,
            pending: None,
            progress: home.progress(),
            progress_multiplier: 0.0,
            displacement_shift: 0.0,
            start_progress: 0.0,
            last_fraction: 0.0,
            inside: false,
            can_block_fling: false,
            fling_guard: FlingGuard::new(),
            next_playback: 0,
            scripted_position: None,
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn detector(&self) -> &SwipeDetector {
        &self.detector
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The state the panel last came to rest in
    pub fn current_state(&self) -> FeedState {
        self.current_state
    }

    /// The state the current (or last) drag started from
    pub fn gesture_origin(&self) -> FeedState {
        self.gesture_origin
    }

    /// Visible progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Unclamped play fraction of the active transition
    pub fn progress_fraction(&self) -> Option<f32> {
        self.transition
            .as_ref()
            .map(|t| t.playback.progress_fraction())
    }

    pub fn progress_multiplier(&self) -> f32 {
        self.progress_multiplier
    }

    pub fn transition(&self) -> Option<ActiveTransition> {
        self.transition.as_ref().map(|t| ActiveTransition {
            from: t.from,
            to: t.to,
        })
    }

    /// Where the running settle will end
    pub fn settle_target(&self) -> Option<FeedState> {
        self.settle.map(|s| s.target)
    }

    pub fn is_fling_blocked(&self) -> bool {
        self.fling_guard.is_blocked()
    }

    pub fn has_pending_completion(&self) -> bool {
        self.pending.is_some()
    }

    // ------------------------------------------------------------------
    // Touch input
    // ------------------------------------------------------------------

    /// Offer a touch to the panel before its content sees it. Returns true
    /// when the panel wants the rest of the touch stream.
    pub fn on_intercept_touch_event(&mut self, event: TouchEvent) -> bool {
        let home = self.graph.home();
        if self.transition.as_ref().is_some_and(|t| t.from != home) {
            return false;
        }
        self.configure_detector();
        self.on_touch_event(event);
        self.detector.is_dragging_or_settling()
    }

    /// Feed a touch the panel owns
    pub fn on_touch_event(&mut self, event: TouchEvent) -> bool {
        for drag in self.detector.on_touch_event(event) {
            self.handle_drag_event(drag);
        }
        true
    }

    pub fn handle_drag_event(&mut self, event: DragEvent) {
        match event {
            DragEvent::Start {
                initial_positive, ..
            } => self.on_drag_start(initial_positive),
            DragEvent::Drag {
                displacement,
                velocity,
            } => {
                self.on_drag(displacement, velocity);
            }
            DragEvent::End { velocity, fling } => self.on_drag_end(velocity, fling),
        }
    }

    fn configure_detector(&mut self) {
        let directions = self.graph.swipe_directions(self.current_state);
        let active = self.transition.is_some();
        self.detector
            .set_detectable_scroll_conditions(directions, active);
    }

    // ------------------------------------------------------------------
    // Scripted drive
    // ------------------------------------------------------------------

    /// Begin a drag driven by fractions of the shift range
    pub fn start_gesture(&mut self, at: Duration) {
        self.scripted_position = Some(0.0);
        self.configure_detector();
        self.on_touch_event(TouchEvent::down(0.0, at));
    }

    pub fn update_gesture(&mut self, fraction: f32, at: Duration) {
        let position = fraction * self.config.shift_range;
        self.scripted_position = Some(position);
        self.on_touch_event(TouchEvent::moved(position, at));
    }

    pub fn end_gesture(&mut self, at: Duration) {
        let Some(position) = self.scripted_position.take() else {
            log::warn!("end_gesture without start_gesture");
            return;
        };
        self.on_touch_event(TouchEvent::up(position, at));
    }

    // ------------------------------------------------------------------
    // Drag callbacks
    // ------------------------------------------------------------------

    pub fn on_drag_start(&mut self, initial_positive: bool) {
        self.gesture_origin = self.current_state;
        self.settle = None;
        self.phase = Phase::Scrubbing;
        self.displacement_shift = 0.0;

        match self.transition.as_mut() {
            Some(transition) => {
                transition.playback.pause();
                self.start_progress = transition.playback.progress_fraction();
                self.can_block_fling = false;
                log::debug!(
                    "drag caught {} -> {} at {:.3}",
                    transition.from,
                    transition.to,
                    self.start_progress
                );
            }
            None => {
                self.start_progress = 0.0;
                self.progress_multiplier = 0.0;
                self.can_block_fling = true;
                if !self.retarget(false, initial_positive) {
                    log::debug!(
                        "drag from {} has nowhere to go yet (positive: {})",
                        self.current_state,
                        initial_positive
                    );
                }
            }
        }

        self.last_fraction = self.start_progress;
        self.inside = self.start_progress > 0.0 && self.start_progress < 1.0;
        self.fling_guard.reset();
    }

    /// Apply a drag sample. Returns false if no drag is in progress.
    pub fn on_drag(&mut self, displacement: f32, velocity: f32) -> bool {
        if self.phase != Phase::Scrubbing {
            log::warn!("drag sample outside a gesture ignored");
            return false;
        }

        let delta = displacement - self.displacement_shift;
        let fraction = self.start_progress + self.progress_multiplier * delta;
        log::trace!(
            "drag {:.1}px ({:.3}px/ms) -> fraction {:.3}",
            displacement,
            velocity,
            fraction
        );
        self.update_progress(fraction);

        let is_drag_toward_positive = delta > 0.0;
        if fraction <= 0.0 || fraction >= 1.0 {
            if self.inside {
                self.inside = false;
                self.fling_guard.disarm();
            }
            if self.retarget(fraction >= 1.0, is_drag_toward_positive) {
                self.displacement_shift = displacement;
                self.can_block_fling = true;
                self.last_fraction = self.start_progress;
            } else {
                self.last_fraction = fraction;
            }
        } else {
            if !self.inside {
                self.inside = true;
                if self.can_block_fling {
                    self.fling_guard.arm();
                }
            }
            self.fling_guard.observe(fraction > self.last_fraction);
            self.last_fraction = fraction;
        }
        true
    }

    pub fn on_drag_end(&mut self, velocity: f32, fling: bool) {
        if self.phase != Phase::Scrubbing {
            log::warn!("drag end outside a gesture ignored");
            return;
        }
        let Some(transition) = self.transition.as_ref() else {
            log::debug!("drag from {} ended without a transition", self.gesture_origin);
            self.clear_state();
            self.notify_progress();
            return;
        };

        let from = transition.from;
        let to = transition.to;
        let progress = transition.playback.progress_fraction();
        let distance = (transition.playback.to_value() - transition.playback.from_value()).abs();

        let blocked_fling = fling && self.fling_guard.is_blocked();
        let fling = fling && !blocked_fling;

        let target = if fling {
            // A release exactly at rest never agrees with the drag direction
            if sign(velocity) == sign(self.progress_multiplier) {
                to
            } else {
                from
            }
        } else {
            let eased = self.config.scrub_timing.evaluate(clamp_progress(progress));
            if eased > self.config.success_threshold {
                to
            } else {
                from
            }
        };

        // Going against a fling the user released with takes longer
        let factor = if blocked_fling && target == from {
            blocked_fling_duration_factor(velocity)
        } else {
            1
        };
        let frame_ms = self.config.single_frame.as_secs_f32() * 1000.0;
        let projected = clamp_progress(progress + velocity * frame_ms * self.progress_multiplier);

        let (start, end, duration) = if target == to {
            if progress >= 1.0 {
                (1.0, 1.0, Duration::ZERO)
            } else {
                let remaining = (1.0 - progress.max(0.0)) * distance;
                let duration = self
                    .clock
                    .settle_duration(velocity, remaining)
                    .saturating_mul(factor);
                (projected, 1.0, duration)
            }
        } else {
            // The animation keeps running; only its destination changed
            self.host.on_transition_cancelled(from, to);
            if progress <= 0.0 {
                (0.0, 0.0, Duration::ZERO)
            } else {
                let remaining = progress.min(1.0) * distance;
                let duration = self
                    .clock
                    .settle_duration(velocity, remaining)
                    .saturating_mul(factor);
                (projected, 0.0, duration)
            }
        };

        log::debug!(
            "release at {:.3} (velocity {:.3}, fling {}, blocked {}): settle {} -> {} over {:?}",
            progress,
            velocity,
            fling,
            blocked_fling,
            self.gesture_origin,
            target,
            duration
        );

        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition
            .playback
            .play(start, end, duration, TimingFunction::for_velocity(velocity));
        self.settle = Some(SettleAction {
            target,
            playback: transition.playback.id(),
            user_driven: true,
        });
        self.phase = Phase::Settling;
        self.fling_guard.disarm();
        self.inside = false;

        if duration.is_zero() {
            self.advance(Duration::ZERO);
        }
    }

    // ------------------------------------------------------------------
    // Frame ticks
    // ------------------------------------------------------------------

    /// Advance the settle playback by one frame. Returns true while still
    /// animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.phase != Phase::Settling {
            return false;
        }
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let id = transition.playback.id();
        match transition.playback.advance(dt) {
            PlaybackStep::Idle => false,
            PlaybackStep::Running(value) => {
                self.set_progress(value, true);
                true
            }
            PlaybackStep::Finished(value) => {
                self.set_progress(value, false);
                self.on_settle_finished(id);
                false
            }
        }
    }

    fn on_settle_finished(&mut self, playback: PlaybackId) {
        let action = match self.settle {
            Some(action) if action.playback == playback => action,
            _ => {
                log::warn!("finish from superseded playback {:?} ignored", playback);
                return;
            }
        };
        let nominal_to = self.transition.as_ref().map(|t| t.to);

        self.clear_state();
        if let Some(pending) = self.pending.take() {
            pending.finish(nominal_to == Some(action.target));
        }
        self.current_state = action.target;
        log::debug!("settled in {}", action.target);

        self.notify_progress();
        self.host.on_settled(action.target);
    }

    // ------------------------------------------------------------------
    // Programmatic control
    // ------------------------------------------------------------------

    /// Install the handshake for an externally requested transition. A
    /// previously installed one is resolved as not reached.
    pub fn set_pending_completion(&mut self, pending: PendingCompletion) {
        if let Some(previous) = self.pending.take() {
            if !previous.ptr_eq(&pending) {
                previous.finish(false);
            }
        }
        self.pending = Some(pending);
    }

    /// Jump straight to the home state
    pub fn close_now(&mut self) {
        self.cancel_pending();
        if let Some(mut transition) = self.transition.take() {
            transition.playback.cancel();
        }
        self.clear_state();

        let home = self.graph.home();
        self.current_state = home;
        self.set_progress(home.progress(), true);
        self.host.on_settled(home);
    }

    /// Animate to the home state. Returns false if a drag in progress
    /// overrode the request, in which case `pending` resolves as not reached.
    pub fn close_animated(
        &mut self,
        duration: Option<Duration>,
        pending: Option<PendingCompletion>,
    ) -> bool {
        if self.phase == Phase::Scrubbing {
            log::debug!("close request overridden by active drag");
            if let Some(pending) = pending {
                pending.finish(false);
            }
            return false;
        }

        let home = self.graph.home();
        let from = match self.transition.as_ref() {
            None if self.current_state == home => {
                if let Some(pending) = pending {
                    pending.finish(true);
                }
                return true;
            }
            None => self.current_state,
            Some(t) if t.to == home => t.from,
            Some(t) if t.from == home => t.to,
            Some(t) => t.from,
        };

        self.cancel_pending();
        if let Some(mut transition) = self.transition.take() {
            transition.playback.cancel();
        }

        let span = home.progress() - from.progress();
        let start = if span == 0.0 {
            0.0
        } else {
            clamp_progress((self.progress - from.progress()) / span)
        };
        let duration = duration.unwrap_or(self.config.close_duration);
        let mut playback = Playback::new(self.next_playback_id(), from.progress(), home.progress());
        playback.play(start, 1.0, duration, self.config.close_timing.clone());

        self.progress_multiplier = self.clock.progress_per_unit_displacement(
            from.progress(),
            home.progress(),
            self.config.shift_range,
        );
        self.settle = Some(SettleAction {
            target: home,
            playback: playback.id(),
            user_driven: false,
        });
        self.transition = Some(Transition {
            from,
            to: home,
            playback,
        });
        self.pending = pending;
        self.phase = Phase::Settling;
        log::debug!("closing {} -> {} over {:?}", from, home, duration);
        self.host.on_transition_started(from, home);

        if duration.is_zero() {
            self.advance(Duration::ZERO);
        }
        true
    }

    /// Close according to a request from the host
    pub fn close(&mut self, request: CloseRequest) {
        if request.animated {
            self.close_animated(request.duration, None);
        } else {
            self.close_now();
        }
    }

    /// Back navigation closes the panel with the default animation
    pub fn on_back_pressed(&mut self) -> bool {
        self.close_animated(None, None);
        true
    }

    /// The panel was laid out with a new width
    pub fn on_layout(&mut self, shift_range: f32) {
        if !is_positive(shift_range) {
            log::warn!("ignoring layout with shift range {}", shift_range);
            return;
        }
        self.config.shift_range = shift_range;
        match self.phase {
            Phase::Idle => self.set_progress(self.current_state.progress(), false),
            Phase::Settling => {
                if let Some(t) = self.transition.as_ref() {
                    self.progress_multiplier = self.clock.progress_per_unit_displacement(
                        t.playback.from_value(),
                        t.playback.to_value(),
                        shift_range,
                    );
                }
            }
            // Keep the drag's mapping stable until it ends
            Phase::Scrubbing => {}
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Make the next transition along the graph active.
    ///
    /// Fails without touching anything when the transition would be the one
    /// already active or when the graph has no edge in that direction.
    fn retarget(&mut self, reached_to_state: bool, is_drag_toward_positive: bool) -> bool {
        let new_from = match self.transition.as_ref() {
            None => self.current_state,
            Some(t) if reached_to_state => t.to,
            Some(t) => t.from,
        };
        let new_to = self.graph.target_state(new_from, is_drag_toward_positive);

        if new_from == new_to {
            return false;
        }
        if self
            .transition
            .as_ref()
            .is_some_and(|t| t.from == new_from && t.to == new_to)
        {
            return false;
        }

        self.cancel_pending();
        if let Some(mut old) = self.transition.take() {
            old.playback.cancel();
        }
        self.settle = None;

        self.progress_multiplier = self.clock.progress_per_unit_displacement(
            new_from.progress(),
            new_to.progress(),
            self.config.shift_range,
        );
        self.start_progress = 0.0;
        let playback = Playback::new(self.next_playback_id(), new_from.progress(), new_to.progress());
        self.transition = Some(Transition {
            from: new_from,
            to: new_to,
            playback,
        });

        log::debug!("retarget {} -> {}", new_from, new_to);
        self.host.on_transition_started(new_from, new_to);
        true
    }

    fn update_progress(&mut self, fraction: f32) {
        if let Some(transition) = self.transition.as_mut() {
            let value = transition.playback.scrub_to_fraction(fraction);
            self.set_progress(value, true);
        }
    }

    fn set_progress(&mut self, value: f32, notify: bool) {
        self.progress = clamp_progress(value);
        if notify {
            self.notify_progress();
        }
    }

    fn notify_progress(&mut self) {
        let user_driven = match self.phase {
            Phase::Idle => false,
            Phase::Scrubbing => true,
            Phase::Settling => self.settle.is_some_and(|s| s.user_driven),
        };
        self.host.on_progress_changed(self.progress, user_driven);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.finish(false);
        }
    }

    /// Drop the active transition and return to idle
    fn clear_state(&mut self) {
        self.transition = None;
        self.settle = None;
        self.phase = Phase::Idle;
        self.inside = false;
        self.detector.finished_scrolling();
        self.detector
            .set_detectable_scroll_conditions(SwipeDirections::empty(), false);
    }

    fn next_playback_id(&mut self) -> PlaybackId {
        self.next_playback += 1;
        PlaybackId(self.next_playback)
    }
}

impl<H: FeedHost> Drop for FeedController<H> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn sign(value: f32) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(f32, bool)>,
        started: Vec<(FeedState, FeedState)>,
        cancelled: Vec<(FeedState, FeedState)>,
        settled: Vec<FeedState>,
    }

    impl FeedHost for Recorder {
        fn on_progress_changed(&mut self, progress: f32, user_driven: bool) {
            self.progress.push((progress, user_driven));
        }

        fn on_transition_started(&mut self, from: FeedState, to: FeedState) {
            self.started.push((from, to));
        }

        fn on_transition_cancelled(&mut self, from: FeedState, to: FeedState) {
            self.cancelled.push((from, to));
        }

        fn on_settled(&mut self, state: FeedState) {
            self.settled.push(state);
        }
    }

    fn controller() -> FeedController<Recorder> {
        FeedController::new(FeedConfig::new().shift_range(1000.0), Recorder::default()).unwrap()
    }

    fn run_to_rest(controller: &mut FeedController<Recorder>) {
        for _ in 0..200 {
            if !controller.advance(Duration::from_millis(16)) {
                break;
            }
        }
    }

    #[test]
    fn test_drag_start_from_rest_synthesizes_transition() {
        let mut c = controller();
        c.on_drag_start(true);

        assert_eq!(c.phase(), Phase::Scrubbing);
        assert_eq!(
            c.transition(),
            Some(ActiveTransition {
                from: FeedState::CLOSED,
                to: FeedState::OPEN
            })
        );
        assert_eq!(c.progress_multiplier(), 0.001);
        assert_eq!(c.host().started, vec![(FeedState::CLOSED, FeedState::OPEN)]);
    }

    #[test]
    fn test_drag_start_without_edge_leaves_no_transition() {
        let mut c = controller();
        c.on_drag_start(false);

        assert!(c.transition().is_none());
        assert!(c.host().started.is_empty());

        // The wrong way stays put
        c.on_drag(-200.0, -1.0);
        assert!(c.transition().is_none());
        assert_eq!(c.progress(), 0.0);

        // Turning around finds the edge; progress is measured from here
        c.on_drag(50.0, 1.0);
        assert!(c.transition().is_some());
        c.on_drag(350.0, 1.0);
        assert!((c.progress() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_retarget_rejects_same_pair() {
        let mut c = controller();
        c.on_drag_start(true);
        assert!(!c.retarget(false, true));
        assert_eq!(c.host().started.len(), 1);
    }

    #[test]
    fn test_dragging_past_open_keeps_transition() {
        let mut c = controller();
        c.on_drag_start(true);
        c.on_drag(1300.0, 2.0);

        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.progress_fraction(), Some(1.3));
        assert_eq!(c.host().started.len(), 1);
    }

    #[test]
    fn test_release_past_end_snaps_without_animation() {
        let mut c = controller();
        c.on_drag_start(true);
        c.on_drag(1200.0, 0.5);
        c.on_drag_end(0.5, false);

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.current_state(), FeedState::OPEN);
        assert_eq!(c.host().settled, vec![FeedState::OPEN]);
        assert_eq!(c.host().progress.last(), Some(&(1.0, false)));
    }

    #[test]
    fn test_zero_velocity_fling_falls_back_to_from() {
        let mut c = controller();
        c.on_drag_start(true);
        c.on_drag(700.0, 0.0);
        c.on_drag_end(0.0, true);

        assert_eq!(c.settle_target(), Some(FeedState::CLOSED));
        assert_eq!(c.host().cancelled, vec![(FeedState::CLOSED, FeedState::OPEN)]);
    }

    #[test]
    fn test_stale_finish_is_ignored() {
        let mut c = controller();
        c.on_drag_start(true);
        c.on_drag(600.0, 0.0);
        c.on_drag_end(0.0, false);

        c.on_settle_finished(PlaybackId(999));
        assert_eq!(c.phase(), Phase::Settling);
        assert!(c.host().settled.is_empty());

        run_to_rest(&mut c);
        assert_eq!(c.host().settled, vec![FeedState::OPEN]);
    }

    #[test]
    fn test_close_request_flags() {
        assert_eq!(
            CloseRequest::from_flags(1 | (200 << 2)),
            CloseRequest {
                animated: true,
                duration: Some(Duration::from_millis(200)),
            }
        );
        assert_eq!(
            CloseRequest::from_flags(0),
            CloseRequest {
                animated: false,
                duration: None,
            }
        );
    }

    #[test]
    fn test_stray_drag_is_ignored() {
        let mut c = controller();
        assert!(!c.on_drag(100.0, 1.0));
        c.on_drag_end(1.0, true);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.host().progress.is_empty());
    }

    #[test]
    fn test_layout_reapplies_rest_position_quietly() {
        let mut c = controller();
        c.on_layout(720.0);

        assert_eq!(c.config().shift_range, 720.0);
        assert!(c.host().progress.is_empty());

        c.on_layout(-1.0);
        assert_eq!(c.config().shift_range, 720.0);
    }

    #[test]
    fn test_sign_treats_zero_as_neither() {
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(-0.0), 0);
        assert_eq!(sign(3.0), 1);
        assert_eq!(sign(-3.0), -1);
    }
}
