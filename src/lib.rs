//! Gesture-driven open/close controller for a slide-in panel.
//!
//! `feedslide` maps a horizontal drag to progress between panel states,
//! decides on release whether to settle open or closed (by fling direction or
//! by a progress threshold) and plays the settle animation. Rendering stays
//! with the host: it receives progress through [`FeedHost`] and drives time
//! with [`FeedController::advance`].
//!
//! ```ignore
//! use feedslide::prelude::*;
//!
//! let mut feed = FeedController::new(FeedConfig::default(), |progress: f32, _dragging: bool| {
//!     println!("panel at {progress}");
//! })?;
//! feed.start_gesture(Duration::ZERO);
//! feed.update_gesture(0.7, Duration::from_millis(120));
//! feed.end_gesture(Duration::from_millis(140));
//! while feed.advance(Duration::from_millis(16)) {}
//! ```

pub mod animation;
pub mod clock;
pub mod config;
pub mod controller;
pub mod detector;
pub mod fling_guard;
pub mod handshake;
pub mod host;
pub mod state;

pub use config::{ConfigError, FeedConfig, SettleTiming};
pub use controller::{ActiveTransition, CloseRequest, FeedController, Phase};
pub use handshake::PendingCompletion;
pub use host::FeedHost;
pub use state::{FeedState, StateGraph, SwipeDirection};

pub mod prelude {
    pub use crate::animation::TimingFunction;
    pub use crate::detector::{DragEvent, SwipeDirections, TouchEvent};
    pub use crate::{
        ActiveTransition, CloseRequest, ConfigError, FeedConfig, FeedController, FeedHost,
        FeedState, PendingCompletion, Phase, StateGraph, SwipeDirection,
    };
    pub use std::time::Duration;
}
