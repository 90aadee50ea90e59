//! One-shot "did the transition I asked for actually land?" notification.
//!
//! A [`PendingCompletion`] is created by whoever requests a transition and
//! shared with the controller. Both a gesture that overrides the request and
//! the natural end of the animation race to resolve it, so
//! [`finish`](PendingCompletion::finish) only takes effect once.
//!
//! Dropping the last handle while unresolved is a bug on some exit path. The
//! handshake then resolves itself as not reached, logs a warning and trips a
//! debug assertion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Box<dyn FnOnce(bool)>;

struct Inner {
    outcome: Cell<Option<bool>>,
    callback: RefCell<Option<Callback>>,
}

impl Inner {
    fn resolve(&self, reached: bool) -> bool {
        if self.outcome.get().is_some() {
            return false;
        }
        self.outcome.set(Some(reached));
        // Take the callback out before calling it so it may touch the handle
        let callback = self.callback.borrow_mut().take();
        if let Some(callback) = callback {
            callback(reached);
        }
        true
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if self.outcome.get().is_none() {
            log::warn!("pending completion dropped without being finished");
            self.resolve(false);
            if !std::thread::panicking() {
                debug_assert!(false, "pending completion dropped without being finished");
            }
        }
    }
}

/// Shared, single-threaded one-shot completion handle
#[derive(Clone)]
pub struct PendingCompletion {
    inner: Rc<Inner>,
}

impl PendingCompletion {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                outcome: Cell::new(None),
                callback: RefCell::new(None),
            }),
        }
    }

    /// Create a handshake that runs `callback` with the outcome when resolved
    pub fn with_callback<F>(callback: F) -> Self
    where
        F: FnOnce(bool) + 'static,
    {
        let pending = Self::new();
        *pending.inner.callback.borrow_mut() = Some(Box::new(callback));
        pending
    }

    /// Resolve the handshake. Returns false if it was already resolved, in
    /// which case the first outcome stands.
    pub fn finish(&self, reached: bool) -> bool {
        self.inner.resolve(reached)
    }

    /// The outcome, once resolved
    pub fn outcome(&self) -> Option<bool> {
        self.inner.outcome.get()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Whether two handles refer to the same handshake
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for PendingCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PendingCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCompletion")
            .field("outcome", &self.outcome())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_is_idempotent() {
        let pending = PendingCompletion::new();

        assert!(pending.finish(false));
        assert!(!pending.finish(true));
        assert_eq!(pending.outcome(), Some(false));
    }

    #[test]
    fn test_callback_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(None));
        let pending = {
            let calls = calls.clone();
            let seen = seen.clone();
            PendingCompletion::with_callback(move |reached| {
                calls.set(calls.get() + 1);
                seen.set(Some(reached));
            })
        };

        let shared = pending.clone();
        shared.finish(true);
        pending.finish(false);

        assert_eq!(calls.get(), 1);
        assert_eq!(seen.get(), Some(true));
        assert!(pending.is_finished());
    }

    #[test]
    fn test_clones_share_state() {
        let pending = PendingCompletion::new();
        let other = pending.clone();
        other.finish(true);

        assert!(pending.ptr_eq(&other));
        assert_eq!(pending.outcome(), Some(true));

        let unrelated = PendingCompletion::new();
        assert!(!pending.ptr_eq(&unrelated));
        unrelated.finish(false);
    }

    #[test]
    #[should_panic(expected = "dropped without being finished")]
    #[cfg(debug_assertions)]
    fn test_leaked_handshake_is_fatal_in_debug() {
        let pending = PendingCompletion::new();
        drop(pending);
    }
}
