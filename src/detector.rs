//! Single-axis swipe recognizer.
//!
//! Turns raw touch samples into drag start / drag / drag end events. A touch
//! only becomes a drag once it has moved past the touch slop in a direction
//! the detector was told is currently useful, so taps and swipes the wrong way
//! fall through to whatever lies underneath.
//!
//! ```ignore
//! let mut detector = SwipeDetector::new(&config);
//! detector.set_detectable_scroll_conditions(SwipeDirections::POSITIVE, false);
//! for event in detector.on_touch_event(TouchEvent::down(0.0, Duration::ZERO)) {
//!     // forward to the controller
//! }
//! ```

use std::time::Duration;

use bitflags::bitflags;

use crate::config::FeedConfig;
use crate::state::SwipeDirection;

bitflags! {
    /// Drag directions the detector will start a drag for
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SwipeDirections: u8 {
        const POSITIVE = 0b01;
        const NEGATIVE = 0b10;
    }
}

/// Kind of touch sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// One touch sample along the swipe axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    /// Position along the axis in pixels
    pub position: f32,
    /// Event time since an arbitrary fixed epoch
    pub time: Duration,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: f32, time: Duration) -> Self {
        Self {
            action,
            position,
            time,
        }
    }

    pub fn down(position: f32, time: Duration) -> Self {
        Self::new(TouchAction::Down, position, time)
    }

    pub fn moved(position: f32, time: Duration) -> Self {
        Self::new(TouchAction::Move, position, time)
    }

    pub fn up(position: f32, time: Duration) -> Self {
        Self::new(TouchAction::Up, position, time)
    }
}

/// Gesture callbacks produced by the detector
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// A drag began. `recatch` is set when it grabbed a settling panel.
    Start { recatch: bool, initial_positive: bool },
    /// Displacement in pixels from the drag origin, velocity in px/ms
    Drag { displacement: f32, velocity: f32 },
    /// The finger lifted
    End { velocity: f32, fling: bool },
}

/// Recognizer state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetectorState {
    #[default]
    Idle,
    Dragging,
    /// Released, waiting for the owner to call `finished_scrolling`
    Settling,
}

#[derive(Debug, Clone)]
pub struct SwipeDetector {
    state: DetectorState,
    directions: SwipeDirections,
    ignore_slop_when_settling: bool,
    touch_slop: f32,
    release_velocity: f32,
    dampening_ms: f32,

    down_pos: f32,
    last_pos: f32,
    displacement: f32,
    last_displacement: f32,
    subtract_displacement: f32,
    /// px/ms, low-pass filtered
    velocity: f32,
    last_time: Option<Duration>,
    was_initial_touch_positive: bool,
}

impl SwipeDetector {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            state: DetectorState::Idle,
            directions: SwipeDirections::empty(),
            ignore_slop_when_settling: false,
            touch_slop: config.touch_slop,
            release_velocity: config.release_velocity,
            dampening_ms: config.velocity_dampening.as_secs_f32() * 1000.0,
            down_pos: 0.0,
            last_pos: 0.0,
            displacement: 0.0,
            last_displacement: 0.0,
            subtract_displacement: 0.0,
            velocity: 0.0,
            last_time: None,
            was_initial_touch_positive: false,
        }
    }

    /// Set which directions may start a drag, and whether a touch landing on
    /// a settling panel grabs it without waiting for the slop
    pub fn set_detectable_scroll_conditions(
        &mut self,
        directions: SwipeDirections,
        ignore_slop_when_settling: bool,
    ) {
        self.directions = directions;
        self.ignore_slop_when_settling = ignore_slop_when_settling;
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn is_dragging_or_settling(&self) -> bool {
        matches!(
            self.state,
            DetectorState::Dragging | DetectorState::Settling
        )
    }

    /// Direction of the movement that started the current drag
    pub fn was_initial_touch_positive(&self) -> bool {
        self.was_initial_touch_positive
    }

    /// Called by the owner once the settle it started has finished
    pub fn finished_scrolling(&mut self) {
        self.state = DetectorState::Idle;
    }

    /// Feed one touch sample, returning the drag events it produced in order
    pub fn on_touch_event(&mut self, event: TouchEvent) -> Vec<DragEvent> {
        let mut events = Vec::new();
        match event.action {
            TouchAction::Down => {
                self.down_pos = event.position;
                self.last_pos = event.position;
                self.displacement = 0.0;
                self.last_displacement = 0.0;
                self.velocity = 0.0;
                self.last_time = Some(event.time);
                if self.state == DetectorState::Settling && self.ignore_slop_when_settling {
                    self.start_dragging(&mut events);
                }
            }
            TouchAction::Move => {
                self.displacement = event.position - self.down_pos;
                self.compute_velocity(event.position - self.last_pos, event.time);
                if self.state != DetectorState::Dragging && self.should_scroll_start() {
                    self.start_dragging(&mut events);
                }
                if self.state == DetectorState::Dragging {
                    self.report_dragging(&mut events);
                }
                self.last_pos = event.position;
            }
            TouchAction::Up | TouchAction::Cancel => {
                if self.state == DetectorState::Dragging {
                    self.state = DetectorState::Settling;
                    let fling = self.velocity.abs() > self.release_velocity;
                    log::debug!(
                        "swipe released: velocity {:.3}px/ms fling {}",
                        self.velocity,
                        fling
                    );
                    events.push(DragEvent::End {
                        velocity: self.velocity,
                        fling,
                    });
                }
            }
        }
        events
    }

    fn should_scroll_start(&self) -> bool {
        if self.displacement.abs() < self.touch_slop {
            return false;
        }
        let wanted = SwipeDirection::from_positive(self.displacement > 0.0);
        self.directions.contains(wanted.as_flag())
    }

    fn start_dragging(&mut self, events: &mut Vec<DragEvent>) {
        let recatch = self.state == DetectorState::Settling;
        self.subtract_displacement = if recatch && self.ignore_slop_when_settling {
            0.0
        } else if self.displacement > 0.0 {
            self.touch_slop
        } else {
            -self.touch_slop
        };
        self.state = DetectorState::Dragging;
        self.was_initial_touch_positive = self.displacement > 0.0;
        events.push(DragEvent::Start {
            recatch,
            initial_positive: self.was_initial_touch_positive,
        });
    }

    fn report_dragging(&mut self, events: &mut Vec<DragEvent>) {
        if self.displacement == self.last_displacement {
            return;
        }
        self.last_displacement = self.displacement;
        events.push(DragEvent::Drag {
            displacement: self.displacement - self.subtract_displacement,
            velocity: self.velocity,
        });
    }

    fn compute_velocity(&mut self, delta: f32, time: Duration) {
        let previous = self.last_time.replace(time).unwrap_or(time);
        let dt = time.saturating_sub(previous).as_secs_f32() * 1000.0;
        // Samples sharing a timestamp carry no rate
        if dt <= 0.0 {
            return;
        }
        let velocity = delta / dt;
        if self.velocity.abs() < 0.001 {
            self.velocity = velocity;
        } else {
            let alpha = dt / (self.dampening_ms + dt);
            self.velocity = (1.0 - alpha) * self.velocity + alpha * velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn detector(directions: SwipeDirections) -> SwipeDetector {
        let mut detector = SwipeDetector::new(&FeedConfig::default());
        detector.set_detectable_scroll_conditions(directions, false);
        detector
    }

    #[test]
    fn test_same_timestamp_keeps_velocity_finite() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(0.0, ms(0)));
        detector.on_touch_event(TouchEvent::moved(50.0, ms(10)));
        detector.on_touch_event(TouchEvent::moved(80.0, ms(10)));

        match detector.on_touch_event(TouchEvent::up(80.0, ms(10))).as_slice() {
            [DragEvent::End { velocity, .. }] => assert!((velocity - 5.0).abs() < 1e-3),
            other => panic!("expected end, got {:?}", other),
        }
    }

    #[test]
    fn test_small_movement_is_not_a_drag() {
        let mut detector = detector(SwipeDirections::all());

        assert!(detector.on_touch_event(TouchEvent::down(100.0, ms(0))).is_empty());
        assert!(detector.on_touch_event(TouchEvent::moved(105.0, ms(16))).is_empty());
        assert!(detector.on_touch_event(TouchEvent::up(105.0, ms(32))).is_empty());
        assert_eq!(detector.state(), DetectorState::Idle);
    }

    #[test]
    fn test_drag_subtracts_slop() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(0.0, ms(0)));

        let events = detector.on_touch_event(TouchEvent::moved(108.0, ms(16)));
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            DragEvent::Start {
                recatch: false,
                initial_positive: true
            }
        );
        match events[1] {
            DragEvent::Drag { displacement, .. } => assert_eq!(displacement, 100.0),
            other => panic!("expected drag, got {:?}", other),
        }
        assert!(detector.was_initial_touch_positive());
    }

    #[test]
    fn test_undetectable_direction_is_ignored() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(500.0, ms(0)));

        assert!(detector.on_touch_event(TouchEvent::moved(300.0, ms(16))).is_empty());
        assert!(!detector.is_dragging_or_settling());
    }

    #[test]
    fn test_fast_release_is_fling() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(0.0, ms(0)));
        detector.on_touch_event(TouchEvent::moved(50.0, ms(10)));
        detector.on_touch_event(TouchEvent::moved(100.0, ms(20)));

        let events = detector.on_touch_event(TouchEvent::up(100.0, ms(20)));
        match events.as_slice() {
            [DragEvent::End { velocity, fling }] => {
                assert!((velocity - 5.0).abs() < 1e-3);
                assert!(*fling);
            }
            other => panic!("expected end, got {:?}", other),
        }
        assert_eq!(detector.state(), DetectorState::Settling);

        detector.finished_scrolling();
        assert_eq!(detector.state(), DetectorState::Idle);
    }

    #[test]
    fn test_slow_release_is_not_fling() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(0.0, ms(0)));
        detector.on_touch_event(TouchEvent::moved(20.0, ms(100)));
        detector.on_touch_event(TouchEvent::moved(40.0, ms(200)));

        let events = detector.on_touch_event(TouchEvent::up(40.0, ms(300)));
        assert!(matches!(
            events.as_slice(),
            [DragEvent::End { fling: false, .. }]
        ));
    }

    #[test]
    fn test_recatch_while_settling_skips_slop() {
        let mut detector = detector(SwipeDirections::POSITIVE);
        detector.on_touch_event(TouchEvent::down(0.0, ms(0)));
        detector.on_touch_event(TouchEvent::moved(100.0, ms(16)));
        detector.on_touch_event(TouchEvent::up(100.0, ms(32)));

        detector.set_detectable_scroll_conditions(SwipeDirections::POSITIVE, true);
        let events = detector.on_touch_event(TouchEvent::down(300.0, ms(100)));
        assert!(matches!(
            events.as_slice(),
            [DragEvent::Start { recatch: true, .. }]
        ));

        let events = detector.on_touch_event(TouchEvent::moved(303.0, ms(116)));
        match events.as_slice() {
            [DragEvent::Drag { displacement, .. }] => assert_eq!(*displacement, 3.0),
            other => panic!("expected drag, got {:?}", other),
        }
    }
}
