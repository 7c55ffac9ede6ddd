//! Bounded telemetry queue between producers and the network egress task.
//!
//! Fixed-capacity FIFO over `heapless::Deque`. Semantics are at-most-once,
//! fire-and-forget: [`try_enqueue`](TelemetryQueue::try_enqueue) never
//! blocks and a full queue means the message is dropped — an expected
//! outcome under burst conditions, not a fault. Only the egress task calls
//! [`dequeue_timeout`](TelemetryQueue::dequeue_timeout), which blocks
//! cooperatively up to its deadline.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Bounded multi-producer / single-consumer FIFO.
pub struct TelemetryQueue<T, const N: usize> {
    items: Mutex<heapless::Deque<T, N>>,
    ready: Condvar,
}

impl<T, const N: usize> TelemetryQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            items: Mutex::new(heapless::Deque::new()),
            ready: Condvar::new(),
        }
    }

    /// Enqueue without blocking. On a full queue the message is handed
    /// back so the caller can log what was dropped.
    pub fn try_enqueue(&self, msg: T) -> Result<(), T> {
        let mut items = self.items.lock().expect("telemetry queue mutex poisoned");
        match items.push_back(msg) {
            Ok(()) => {
                self.ready.notify_one();
                Ok(())
            }
            Err(msg) => Err(msg),
        }
    }

    /// Block up to `timeout` for the next message. Used exclusively by
    /// the egress task.
    pub fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = std::time::Instant::now() + timeout;
        let mut items = self.items.lock().expect("telemetry queue mutex poisoned");
        loop {
            if let Some(msg) = items.pop_front() {
                return Some(msg);
            }
            let now = std::time::Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = self
                .ready
                .wait_timeout(items, deadline - now)
                .expect("telemetry queue mutex poisoned");
            items = guard;
        }
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .expect("telemetry queue mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const N: usize> Default for TelemetryQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
