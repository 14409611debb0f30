/*!
 * One-Shot Signal
 *
 * A single-use rendezvous: raised at most once with a value, observed by
 * any number of waiters. This is the primitive behind the load-complete
 * and exit handshakes between a child and the record its parent holds;
 * a plain flag read without synchronization would race the writer.
 */

use parking_lot::{Condvar, Mutex};

pub struct OnceSignal<T> {
    slot: Mutex<Option<T>>,
    cond: Condvar,
}

impl<T: Clone> OnceSignal<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            cond: Condvar::new(),
        }
    }

    /// Raise the signal with `value`, waking every waiter.
    ///
    /// Returns `false` if the signal was already raised; the first value
    /// sticks and the second is dropped.
    pub fn signal(&self, value: T) -> bool {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        self.cond.notify_all();
        true
    }

    /// Block until the signal is raised, then return the value.
    ///
    /// No timeout: a signal that is never raised blocks forever, matching
    /// the minimal wait-then-proceed contract of the process lifecycle.
    pub fn wait(&self) -> T {
        let mut slot = self.slot.lock();
        loop {
            if let Some(value) = slot.as_ref() {
                return value.clone();
            }
            self.cond.wait(&mut slot);
        }
    }

    /// Non-blocking read of the value, if raised.
    pub fn peek(&self) -> Option<T> {
        self.slot.lock().clone()
    }

    /// Whether the signal has been raised.
    pub fn is_raised(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<T: Clone> Default for OnceSignal<T> {
    fn default() -> Self {
        Self::new()
    }
}
