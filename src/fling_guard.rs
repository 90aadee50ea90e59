//! Suppresses a release fling after the drag stopped advancing.
//!
//! A fast release right after the finger reversed or stalled would make the
//! panel jump toward a state the user was moving away from. The guard watches
//! drag samples while armed and blocks the fling if any of them did not move
//! toward the transition's target.

#[derive(Debug, Default)]
pub struct FlingGuard {
    armed: bool,
    blocked: bool,
}

impl FlingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; called when a drag starts
    pub fn reset(&mut self) {
        self.armed = false;
        self.blocked = false;
    }

    /// Start watching samples
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stop watching samples. A block already recorded stays.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Record one drag sample. Ignored unless armed.
    pub fn observe(&mut self, still_advancing: bool) {
        if self.armed && !still_advancing {
            self.blocked = true;
        }
    }

    /// True if an armed sample since the last reset was not advancing
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_armed_never_blocks() {
        let mut guard = FlingGuard::new();
        guard.observe(false);
        guard.observe(false);
        assert!(!guard.is_blocked());
    }

    #[test]
    fn test_reversal_while_armed_blocks() {
        let mut guard = FlingGuard::new();
        guard.arm();
        guard.observe(true);
        assert!(!guard.is_blocked());
        guard.observe(false);
        assert!(guard.is_blocked());
    }

    #[test]
    fn test_block_survives_disarm_until_reset() {
        let mut guard = FlingGuard::new();
        guard.arm();
        guard.observe(false);
        guard.disarm();
        guard.observe(true);
        assert!(guard.is_blocked());

        guard.reset();
        assert!(!guard.is_blocked());

        // Reset also disarms
        guard.observe(false);
        assert!(!guard.is_blocked());
    }
}
