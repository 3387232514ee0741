//! Interrupt handler (top half): runs once per RTC tick.
//!
//! Everything this module touches that isn't a lock-free queue is exclusive
//! to this handler -- the pending list and `alarm_count` are never seen by
//! the worker or the API layer, so they live in a plain `SyncUnsafeCell`
//! rather than behind a mutex. Taking a lock here would be a bug: the
//! handler runs with interrupts disabled on a small, fragile stack and must
//! never allocate, free, block, or wait.

use core::cell::SyncUnsafeCell;

use rtcsched_lib::MsgQueue;

use crate::cmos;
use crate::config::QUEUE_CAPACITY;
use crate::id_alloc::TimerId;
use crate::timer_list::{Mode, TimerEntry, TimerList};

pub static NEW_QUEUE: MsgQueue<*mut TimerEntry, QUEUE_CAPACITY> =
    MsgQueue::new(core::ptr::null_mut());
pub static CANCEL_QUEUE: MsgQueue<TimerId, QUEUE_CAPACITY> = MsgQueue::new(0);
pub static READY_QUEUE: MsgQueue<*mut TimerEntry, QUEUE_CAPACITY> =
    MsgQueue::new(core::ptr::null_mut());

struct HandlerState {
    list: TimerList,
    alarm_count: u32,
}

static STATE: SyncUnsafeCell<HandlerState> = SyncUnsafeCell::new(HandlerState {
    list: TimerList::new(),
    alarm_count: 0,
});

/// Entry point wired to the RTC's periodic-interrupt vector. Must be the
/// only caller of anything in this module that touches `STATE`.
pub fn on_tick() {
    let status = cmos::read_and_clear_status_c();
    if !status.contains(cmos::StatusC::PERIODIC) {
        panic!("rtc: tick without PERIODIC bit set in register C -- shared IRQ8 line misconfigured");
    }

    // SAFETY: the RTC ISR is the sole caller of `on_tick`, it never nests
    // (interrupts stay disabled for the ISR's duration), and no other
    // execution domain ever touches `STATE`.
    let state = unsafe { &mut *STATE.get() };

    state.list.age();

    while let Some(entry) = NEW_QUEUE.try_get() {
        if unsafe { (*entry).mode } == Mode::Alarm {
            state.alarm_count += 1;
        }
        state.list.push_front(entry);
    }

    while let Some(id) = CANCEL_QUEUE.try_get() {
        if let Some((entry, was_alarm)) = state.list.unlink_by_id(id) {
            if was_alarm {
                state.alarm_count = state.alarm_count.saturating_sub(1);
            }
            let _ = READY_QUEUE.try_put(entry);
        }
    }

    if state.list.is_empty() {
        return;
    }

    let alarm_sample = if state.alarm_count > 0 {
        Some(cmos::read_wall_clock())
    } else {
        None
    };

    state.list.expire(alarm_sample, |entry, was_alarm| {
        if was_alarm {
            state.alarm_count = state.alarm_count.saturating_sub(1);
        }
        let _ = READY_QUEUE.try_put(entry);
    });
}
