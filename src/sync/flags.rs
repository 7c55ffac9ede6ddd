//! Event flag group — the wake-up bus between producers and a control task.
//!
//! Modelled on an RTOS event group: producers OR bits into a shared word
//! (idempotent — raising an already-set flag is a no-op), and the single
//! consumer blocks in [`FlagGroup::wait_any`] until at least one bit in
//! its mask is set. The wait atomically clears exactly the bits it
//! observed and returns them, so no update is ever consumed twice or lost.
//!
//! Producers never block; the consumer blocks cooperatively on a condvar
//! (no polling — the control task has no useful work while no flag is set).

use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// A fixed set of independent binary flags shared between tasks.
pub struct FlagGroup {
    bits: Mutex<u32>,
    wake: Condvar,
}

impl FlagGroup {
    pub const fn new() -> Self {
        Self {
            bits: Mutex::new(0),
            wake: Condvar::new(),
        }
    }

    /// OR `flags` into the shared word and wake any waiter.
    ///
    /// Callable from any task; raising an already-raised flag is a no-op.
    pub fn raise(&self, flags: u32) {
        let mut bits = self.bits.lock().expect("flag group mutex poisoned");
        *bits |= flags;
        self.wake.notify_all();
    }

    /// Block until at least one bit in `mask` is set, then atomically
    /// clear the observed bits and return them.
    ///
    /// Single-consumer discipline: only the owning control task calls this.
    pub fn wait_any(&self, mask: u32) -> u32 {
        let mut bits = self.bits.lock().expect("flag group mutex poisoned");
        loop {
            let observed = *bits & mask;
            if observed != 0 {
                *bits &= !observed;
                return observed;
            }
            bits = self
                .wake
                .wait(bits)
                .expect("flag group mutex poisoned");
        }
    }

    /// Like [`wait_any`](Self::wait_any) but gives up after `timeout`,
    /// returning `None` if no masked flag was raised in time.
    pub fn wait_any_timeout(&self, mask: u32, timeout: Duration) -> Option<u32> {
        let deadline = std::time::Instant::now() + timeout;
        let mut bits = self.bits.lock().expect("flag group mutex poisoned");
        loop {
            let observed = *bits & mask;
            if observed != 0 {
                *bits &= !observed;
                return Some(observed);
            }
            let now = std::time::Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = self
                .wake
                .wait_timeout(bits, deadline - now)
                .expect("flag group mutex poisoned");
            bits = guard;
        }
    }

    /// Currently raised bits, without consuming them.
    pub fn peek(&self) -> u32 {
        *self.bits.lock().expect("flag group mutex poisoned")
    }
}

impl Default for FlagGroup {
    fn default() -> Self {
        Self::new()
    }
}
