//! Drives the feed panel with a scripted swipe and prints every frame.
//!
//! Run with `RUST_LOG=debug cargo run --example scripted_swipe` to see the
//! controller's decisions.

use feedslide::prelude::*;

struct PrintHost;

impl FeedHost for PrintHost {
    fn on_progress_changed(&mut self, progress: f32, user_driven: bool) {
        let width = 40;
        let filled = (progress * width as f32).round() as usize;
        println!(
            "[{}{}] {:.3}{}",
            "#".repeat(filled),
            " ".repeat(width - filled),
            progress,
            if user_driven { "" } else { " (idle)" }
        );
    }

    fn on_settled(&mut self, state: FeedState) {
        println!("settled: {}", state);
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let mut feed = FeedController::new(FeedConfig::new().shift_range(1080.0), PrintHost)?;
    let frame = Duration::from_millis(16);

    // Open with a slow swipe that stops past the threshold
    let mut now = Duration::ZERO;
    feed.start_gesture(now);
    for step in 1..=8 {
        now += frame;
        feed.update_gesture(step as f32 * 0.08, now);
    }
    now += Duration::from_millis(120);
    feed.update_gesture(0.64, now);
    feed.end_gesture(now);
    while feed.advance(frame) {}

    // Then close it from the host side and wait for the handshake
    let pending = PendingCompletion::with_callback(|reached| {
        println!("close reached home: {}", reached);
    });
    feed.close_animated(None, Some(pending));
    while feed.advance(frame) {}

    Ok(())
}
