//! Mutex that disables interrupts while held.
//!
//! Essential for kernel state touched from both normal and interrupt
//! context: acquiring the lock from a handler is always safe because the
//! handler runs with interrupts already off, and acquiring it from task
//! context disables them for the duration of the critical section.
//!
//! Internally a ticket lock for FIFO fairness under contention.

use core::cell::UnsafeCell;
use core::hint::spin_loop;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU16, Ordering};

use crate::cpu;

pub struct IrqMutex<T> {
    next_ticket: AtomicU16,
    now_serving: AtomicU16,
    data: UnsafeCell<T>,
}

// SAFETY: exclusive access is established by ticket-lock acquisition with
// interrupts disabled, so `T: Send` is sufficient for cross-context sharing.
unsafe impl<T: Send> Send for IrqMutex<T> {}
unsafe impl<T: Send> Sync for IrqMutex<T> {}

pub struct IrqMutexGuard<'a, T> {
    mutex: &'a IrqMutex<T>,
    saved_flags: u64,
}

impl<T> IrqMutex<T> {
    #[inline]
    pub const fn new(data: T) -> Self {
        Self {
            next_ticket: AtomicU16::new(0),
            now_serving: AtomicU16::new(0),
            data: UnsafeCell::new(data),
        }
    }

    #[inline]
    pub fn lock(&self) -> IrqMutexGuard<'_, T> {
        let saved_flags = cpu::save_flags_cli();
        let my_ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        while self.now_serving.load(Ordering::Acquire) != my_ticket {
            spin_loop();
        }
        IrqMutexGuard {
            mutex: self,
            saved_flags,
        }
    }

    /// Non-blocking variant used from interrupt context, where a held lock
    /// would mean spinning with interrupts already off forever. Returns
    /// `None` if the lock is currently held.
    #[inline]
    pub fn try_lock(&self) -> Option<IrqMutexGuard<'_, T>> {
        let saved_flags = cpu::save_flags_cli();
        let ticket = self.now_serving.load(Ordering::Acquire);
        if self
            .next_ticket
            .compare_exchange(ticket, ticket.wrapping_add(1), Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(IrqMutexGuard {
                mutex: self,
                saved_flags,
            })
        } else {
            cpu::restore_flags(saved_flags);
            None
        }
    }
}

impl<'a, T> Drop for IrqMutexGuard<'a, T> {
    #[inline]
    fn drop(&mut self) {
        self.mutex.now_serving.fetch_add(1, Ordering::Release);
        cpu::restore_flags(self.saved_flags);
    }
}

impl<'a, T> Deref for IrqMutexGuard<'a, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &T {
        unsafe { &*self.mutex.data.get() }
    }
}

impl<'a, T> DerefMut for IrqMutexGuard<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.mutex.data.get() }
    }
}
