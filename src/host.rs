use crate::state::FeedState;

/// Receiver for everything the controller wants the outside world to know.
///
/// The host owns presentation (alpha, translation, window attachment). Only
/// [`on_progress_changed`](FeedHost::on_progress_changed) is required.
pub trait FeedHost {
    /// Visible progress changed. `user_driven` is true while a gesture or
    /// the settle that follows it is in flight.
    fn on_progress_changed(&mut self, progress: f32, user_driven: bool);

    /// A new transition between two states became active
    fn on_transition_started(&mut self, _from: FeedState, _to: FeedState) {}

    /// The active transition will not reach `to`; it is still animating
    fn on_transition_cancelled(&mut self, _from: FeedState, _to: FeedState) {}

    /// The panel came to rest in `state`
    fn on_settled(&mut self, _state: FeedState) {}
}

impl<F> FeedHost for F
where
    F: FnMut(f32, bool),
{
    fn on_progress_changed(&mut self, progress: f32, user_driven: bool) {
        self(progress, user_driven)
    }
}
