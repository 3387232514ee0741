//! Monotonic-counter-plus-free-list ID allocator for timer handles.
//!
//! IDs are small positive integers, never reused while a timer entry still
//! holds one, reused only after `free` returns it to the list. Mirrors the
//! sleep queue / task-table style of bookkeeping elsewhere in this codebase:
//! a fixed-capacity array guarded by a single `IrqMutex`, no heap traffic on
//! the common path.

use rtcsched_lib::IrqMutex;

pub type TimerId = u32;

const FREE_LIST_CAPACITY: usize = 256;

struct AllocatorState {
    next: TimerId,
    free: [TimerId; FREE_LIST_CAPACITY],
    free_len: usize,
}

pub struct IdAllocator {
    state: IrqMutex<AllocatorState>,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self {
            state: IrqMutex::new(AllocatorState {
                next: 1,
                free: [0; FREE_LIST_CAPACITY],
                free_len: 0,
            }),
        }
    }

    /// Allocate the next free ID: reuse from the free list if one is
    /// available (LIFO), otherwise extend the monotonic counter.
    ///
    /// Returns `None` only if the free list is full *and* the counter has
    /// wrapped `TimerId::MAX` — effectively unreachable in practice.
    pub fn alloc(&self) -> Option<TimerId> {
        let mut state = self.state.lock();
        if state.free_len > 0 {
            state.free_len -= 1;
            return Some(state.free[state.free_len]);
        }
        if state.next == TimerId::MAX {
            return None;
        }
        let id = state.next;
        state.next += 1;
        Some(id)
    }

    /// Return an ID to the free list. Returning the same ID twice without
    /// an intervening `alloc` would let two live timers share an ID — the
    /// caller (the worker's free-unless-Repeat path) must guarantee each ID
    /// is freed at most once.
    pub fn free(&self, id: TimerId) -> bool {
        let mut state = self.state.lock();
        if state.free_len >= FREE_LIST_CAPACITY {
            return false;
        }
        state.free[state.free_len] = id;
        state.free_len += 1;
        true
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
