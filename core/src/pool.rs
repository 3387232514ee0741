//! Fixed-capacity storage pool for `TimerEntry` records.
//!
//! Timer entries are uniform in size and the system has a hard cap on how
//! many can be live at once, so rather than route them through a general
//! heap allocator this subsystem carves them out of a static array up
//! front. `alloc` hands out a slot's address as a raw pointer; `free`
//! returns the slot. Same shape as `id_alloc::IdAllocator` -- a mutex
//! around a LIFO free list -- just indexing slots instead of ids.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;

use rtcsched_lib::IrqMutex;

use crate::config::MAX_TIMER_ENTRIES;
use crate::timer_list::TimerEntry;

struct PoolState {
    free: [u16; MAX_TIMER_ENTRIES],
    free_len: usize,
}

pub struct TimerPool {
    slots: UnsafeCell<[MaybeUninit<TimerEntry>; MAX_TIMER_ENTRIES]>,
    state: IrqMutex<PoolState>,
}

// `slots` is only ever touched through a slot currently owned by exactly
// one domain (see the ownership discipline in `timer_list`); `state` has
// its own lock.
unsafe impl Sync for TimerPool {}

impl TimerPool {
    pub const fn new() -> Self {
        let mut free = [0u16; MAX_TIMER_ENTRIES];
        let mut i = 0;
        while i < MAX_TIMER_ENTRIES {
            free[i] = (MAX_TIMER_ENTRIES - 1 - i) as u16;
            i += 1;
        }
        Self {
            // SAFETY: an array of `MaybeUninit` needs no initialization.
            slots: UnsafeCell::new(unsafe { MaybeUninit::uninit().assume_init() }),
            state: IrqMutex::new(PoolState {
                free,
                free_len: MAX_TIMER_ENTRIES,
            }),
        }
    }

    /// Take a free slot and initialize it with `entry`. Returns `None` if
    /// the pool is exhausted (translated to `RtcError::Mem` by the API).
    pub fn alloc(&self, entry: TimerEntry) -> Option<*mut TimerEntry> {
        let index = {
            let mut state = self.state.lock();
            if state.free_len == 0 {
                return None;
            }
            state.free_len -= 1;
            state.free[state.free_len] as usize
        };
        // SAFETY: `index` came off the free list, so no other owner holds it.
        let slot = unsafe { &mut (*self.slots.get())[index] };
        Some(slot.write(entry) as *mut TimerEntry)
    }

    /// Return a slot to the pool. `ptr` must have come from `alloc` on this
    /// pool and must not be dereferenced again afterward.
    pub fn free(&self, ptr: *mut TimerEntry) {
        let base = self.slots.get() as *mut MaybeUninit<TimerEntry>;
        // SAFETY: every live pointer this pool hands out points at one of
        // `base`'s `MAX_TIMER_ENTRIES` elements.
        let index = unsafe { ptr.cast::<MaybeUninit<TimerEntry>>().offset_from(base) } as usize;
        let mut state = self.state.lock();
        debug_assert!(state.free_len < MAX_TIMER_ENTRIES, "timer pool free list overflow: double free?");
        state.free[state.free_len] = index as u16;
        state.free_len += 1;
    }
}

impl Default for TimerPool {
    fn default() -> Self {
        Self::new()
    }
}

pub static POOL: TimerPool = TimerPool::new();
