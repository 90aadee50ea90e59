mod playback;
mod timing;

pub use playback::{Playback, PlaybackId, PlaybackStep};
pub use timing::{TimingFunction, FAST_FLING_VELOCITY};
