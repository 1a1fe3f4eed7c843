//! Pending-request latch between the input side and the capture thread.
//!
//! Requests raised while the capture thread is mid-cycle are accumulated
//! (coalesced per flag, never lost) and observed at its next wait point.

use parking_lot::{Condvar, Mutex};

/// A user-visible request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRequest {
    /// Enroll a new reference gesture.
    Record,
    /// Capture an attempt and compare it against the reference.
    Unlock,
    /// Clear the reference (and any attempt).
    Erase,
    /// Stop the capture thread.
    Shutdown,
}

/// Snapshot of accumulated request flags.
///
/// Repeated raises of the same request before the capture thread wakes
/// coalesce into a single flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingRequests {
    pub record: bool,
    pub unlock: bool,
    pub erase: bool,
    pub shutdown: bool,
}

impl PendingRequests {
    /// True if any flag is set.
    pub fn any(&self) -> bool {
        self.record || self.unlock || self.erase || self.shutdown
    }
}

/// Condition-variable-guarded pending-flags accumulator.
///
/// Single consumer (the capture thread), any number of producers (input
/// poller, button interrupt, shutdown handler).
#[derive(Debug, Default)]
pub struct EventLatch {
    pending: Mutex<PendingRequests>,
    cond: Condvar,
}

impl EventLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a request and wake the consumer if it is waiting.
    pub fn raise(&self, request: UserRequest) {
        let mut pending = self.pending.lock();
        match request {
            UserRequest::Record => pending.record = true,
            UserRequest::Unlock => pending.unlock = true,
            UserRequest::Erase => pending.erase = true,
            UserRequest::Shutdown => pending.shutdown = true,
        }
        self.cond.notify_one();
    }

    /// Block until at least one request is pending, then take them all.
    pub fn wait(&self) -> PendingRequests {
        let mut pending = self.pending.lock();
        while !pending.any() {
            self.cond.wait(&mut pending);
        }
        std::mem::take(&mut *pending)
    }

    /// Take whatever is pending without blocking.
    pub fn try_take(&self) -> PendingRequests {
        std::mem::take(&mut *self.pending.lock())
    }
}
