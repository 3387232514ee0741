//! Pending-timer singly-linked list.
//!
//! Owned exclusively by the interrupt handler: no other execution domain
//! ever walks or mutates it. Entries arrive as raw pointers handed off from
//! a `Box<TimerEntry>` whose ownership the caller gave up (see
//! `core::handler`); the list never allocates or frees, it only splices.
//!
//! There is no materialized sentinel node. `TimerList::head` plays the role
//! of the sentinel's `next` field directly, and every traversal uses a
//! pointer-to-pointer cursor (`link: *mut *mut TimerEntry`) that always
//! refers to *somebody's* `next` slot -- the head field for the first
//! position, or the previous entry's `next` field afterwards. Unlinking a
//! node is then just overwriting `*link`, with no special case for removing
//! the first element.

use core::ffi::c_void;
use core::ptr;

use crate::cmos::WallClock;
use crate::id_alloc::TimerId;

pub type TimerCallback = extern "C" fn(*mut c_void);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Once,
    Repeat,
    Alarm,
    Disabled,
}

pub struct TimerEntry {
    pub callback: TimerCallback,
    pub arg: *mut c_void,
    pub mode: Mode,
    pub ticks_left: u32,
    pub ticks_init: u32,
    pub exec_time: WallClock,
    pub id: TimerId,
    next: *mut TimerEntry,
}

// The entry crosses from API context to interrupt context to worker context,
// never touched by two of those at once (see the ownership discipline in
// the handler/worker modules); `Send` reflects that handoff.
unsafe impl Send for TimerEntry {}

impl TimerEntry {
    pub fn once(id: TimerId, callback: TimerCallback, arg: *mut c_void, ticks: u32) -> Self {
        Self {
            callback,
            arg,
            mode: Mode::Once,
            ticks_left: ticks,
            ticks_init: ticks,
            exec_time: WallClock::default(),
            id,
            next: ptr::null_mut(),
        }
    }

    pub fn repeat(id: TimerId, callback: TimerCallback, arg: *mut c_void, ticks: u32) -> Self {
        Self {
            callback,
            arg,
            mode: Mode::Repeat,
            ticks_left: ticks,
            ticks_init: ticks,
            exec_time: WallClock::default(),
            id,
            next: ptr::null_mut(),
        }
    }

    pub fn alarm(id: TimerId, callback: TimerCallback, arg: *mut c_void, at: WallClock) -> Self {
        Self {
            callback,
            arg,
            mode: Mode::Alarm,
            ticks_left: 0,
            ticks_init: 0,
            exec_time: at,
            id,
            next: ptr::null_mut(),
        }
    }
}

pub struct TimerList {
    head: *mut TimerEntry,
}

// Same rationale as `TimerEntry`: the list itself only ever lives inside the
// handler's state, but that state is parked in a `static` alongside other
// `Send` data during init.
unsafe impl Send for TimerList {}

impl TimerList {
    pub const fn new() -> Self {
        Self {
            head: ptr::null_mut(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    /// Splice `entry` onto the front of the list, right after the sentinel.
    /// Step 3 of the handler algorithm: entries enter here, never mid-list.
    pub fn push_front(&mut self, entry: *mut TimerEntry) {
        unsafe {
            (*entry).next = self.head;
        }
        self.head = entry;
    }

    /// Step 2: decrement `ticks_left` for every entry with mode != Alarm and
    /// ticks_left > 0. Ordinary traversal; nothing is ever unlinked here.
    pub fn age(&mut self) {
        let mut cur = self.head;
        while !cur.is_null() {
            unsafe {
                let entry = &mut *cur;
                if entry.mode != Mode::Alarm && entry.ticks_left > 0 {
                    entry.ticks_left -= 1;
                }
                cur = entry.next;
            }
        }
    }

    /// Step 4: unlink the entry with the given id, setting its mode to
    /// `Disabled`. Returns the pointer and whether the removed entry was an
    /// alarm (so the caller can keep its own `alarm_count` in sync).
    pub fn unlink_by_id(&mut self, id: TimerId) -> Option<(*mut TimerEntry, bool)> {
        let mut link: *mut *mut TimerEntry = &mut self.head;
        loop {
            let cur = unsafe { *link };
            if cur.is_null() {
                return None;
            }
            let entry = unsafe { &mut *cur };
            if entry.id == id {
                let was_alarm = entry.mode == Mode::Alarm;
                unsafe {
                    *link = entry.next;
                }
                entry.next = ptr::null_mut();
                entry.mode = Mode::Disabled;
                return Some((cur, was_alarm));
            }
            link = unsafe { &mut (*cur).next as *mut *mut TimerEntry };
        }
    }

    /// Step 7: walk the list once, expiring entries. `alarm_sample`, when
    /// present, is the wall clock snapshot taken earlier this tick (step 6);
    /// alarm entries are only considered when it is `Some`.
    ///
    /// `on_ready(entry, was_alarm)` is invoked for every entry that should be
    /// published to the ready queue, in traversal order. The traversal
    /// cursor `link` advances to the unlinked entry's successor only when no
    /// unlink happened on this node; when one did, `*link` already holds
    /// that successor (the unlink overwrote it), so the loop simply
    /// re-reads `*link` next iteration instead of following the removed
    /// node's own (now stale) `next` field. Advancing unconditionally
    /// through that stale field is the traversal bug this deliberately
    /// avoids.
    pub fn expire(&mut self, alarm_sample: Option<WallClock>, mut on_ready: impl FnMut(*mut TimerEntry, bool)) {
        let mut link: *mut *mut TimerEntry = &mut self.head;
        loop {
            let cur = unsafe { *link };
            if cur.is_null() {
                break;
            }
            let entry = unsafe { &mut *cur };
            let mut unlinked = false;

            match entry.mode {
                Mode::Once if entry.ticks_left == 0 => {
                    unsafe {
                        *link = entry.next;
                    }
                    entry.next = ptr::null_mut();
                    unlinked = true;
                    on_ready(cur, false);
                }
                Mode::Repeat if entry.ticks_left == 0 => {
                    entry.ticks_left = entry.ticks_init;
                    on_ready(cur, false);
                }
                Mode::Alarm => {
                    if let Some(sample) = alarm_sample {
                        if sample == entry.exec_time {
                            unsafe {
                                *link = entry.next;
                            }
                            entry.next = ptr::null_mut();
                            unlinked = true;
                            on_ready(cur, true);
                        }
                    }
                }
                _ => {}
            }

            if !unlinked {
                link = unsafe { &mut (*cur).next as *mut *mut TimerEntry };
            }
        }
    }
}

impl Default for TimerList {
    fn default() -> Self {
        Self::new()
    }
}
