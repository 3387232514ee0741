//! Minimal blocking primitive for a handler/worker handoff.
//!
//! There is exactly one consumer of interest in this codebase: the single
//! bottom-half worker task blocking until the top-half interrupt handler has
//! produced something for it. A generation counter plus `hlt`-and-recheck is
//! all that shape needs — no run queue, no task pointers, nothing that
//! requires the full scheduler.
//!
//! `wait_event` is safe to call only from task context (never from the
//! handler itself: `hlt` would stall the CPU mid-interrupt).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::cpu;

pub struct WaitQueue {
    generation: AtomicU32,
}

impl WaitQueue {
    pub const fn new() -> Self {
        Self {
            generation: AtomicU32::new(0),
        }
    }

    /// Block the calling task until `predicate` is true, waking on every
    /// interrupt to re-check it.
    pub fn wait_event(&self, mut predicate: impl FnMut() -> bool) {
        loop {
            let seen = self.generation.load(Ordering::Acquire);
            if predicate() {
                return;
            }
            cpu::enable_interrupts();
            // If a wake happened between the check and here, `generation`
            // has already moved past `seen` and the hlt returns on the very
            // next interrupt regardless of source.
            while self.generation.load(Ordering::Acquire) == seen {
                cpu::halt_once();
            }
        }
    }

    /// Wake any task parked in `wait_event`. Safe to call from interrupt
    /// context: it only bumps a counter, never blocks or allocates.
    pub fn wake_all(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}
