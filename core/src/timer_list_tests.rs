//! Regression tests for the pending-timer list: splice order, aging,
//! cancellation, and the unlink-while-walking traversal cursor (a
//! pointer-to-pointer cursor, not a naive `prev`/`cur` pair, so unlinking
//! consecutive entries mid-walk can't skip the one right after).

use core::ffi::c_int;
use core::ptr;

use rtcsched_lib::{assert_eq_test, assert_test, define_test_suite};

use crate::cmos::WallClock;
use crate::timer_list::{Mode, TimerEntry, TimerList};

extern "C" fn noop(_arg: *mut core::ffi::c_void) {}

fn push_front_splices_at_head_in_lifo_order() -> c_int {
    let mut a = TimerEntry::once(1, noop, ptr::null_mut(), 0);
    let mut b = TimerEntry::once(2, noop, ptr::null_mut(), 0);

    let mut list = TimerList::new();
    assert_test!(list.is_empty());
    list.push_front(&mut a as *mut TimerEntry);
    list.push_front(&mut b as *mut TimerEntry);
    assert_test!(!list.is_empty());

    // Both entries were created with ticks_left == 0, so a single expire
    // pass drains them in traversal order: head first, i.e. the most
    // recently pushed (`b`) before the one pushed before it (`a`).
    let mut order = [0u32; 2];
    let mut i = 0;
    list.expire(None, |entry, _was_alarm| {
        order[i] = unsafe { (*entry).id };
        i += 1;
    });

    assert_eq_test!(i, 2);
    assert_eq_test!(order[0], 2);
    assert_eq_test!(order[1], 1);
    assert_test!(list.is_empty());
    0
}

fn age_decrements_once_and_repeat_but_not_alarm() -> c_int {
    let mut once = TimerEntry::once(1, noop, ptr::null_mut(), 5);
    let mut repeat = TimerEntry::repeat(2, noop, ptr::null_mut(), 5);
    let mut alarm = TimerEntry::alarm(3, noop, ptr::null_mut(), WallClock::default());

    let mut list = TimerList::new();
    list.push_front(&mut once as *mut TimerEntry);
    list.push_front(&mut repeat as *mut TimerEntry);
    list.push_front(&mut alarm as *mut TimerEntry);

    list.age();

    assert_eq_test!(once.ticks_left, 4);
    assert_eq_test!(repeat.ticks_left, 4);
    assert_eq_test!(alarm.ticks_left, 0);
    0
}

fn age_never_underflows_at_zero() -> c_int {
    let mut once = TimerEntry::once(1, noop, ptr::null_mut(), 0);
    let mut list = TimerList::new();
    list.push_front(&mut once as *mut TimerEntry);
    list.age();
    assert_eq_test!(once.ticks_left, 0);
    0
}

fn unlink_by_id_marks_disabled_and_reports_alarm() -> c_int {
    let mut entry = TimerEntry::alarm(7, noop, ptr::null_mut(), WallClock::default());
    let mut list = TimerList::new();
    list.push_front(&mut entry as *mut TimerEntry);

    let (ptr, was_alarm) = list.unlink_by_id(7).expect("entry must be found");
    assert_test!(was_alarm);
    assert_test!(list.is_empty());
    let unlinked = unsafe { &*ptr };
    assert_eq_test!(unlinked.mode, Mode::Disabled);
    0
}

fn unlink_by_id_missing_returns_none() -> c_int {
    let mut list = TimerList::new();
    let mut entry = TimerEntry::once(1, noop, ptr::null_mut(), 10);
    list.push_front(&mut entry as *mut TimerEntry);
    assert_test!(list.unlink_by_id(999).is_none());
    0
}

fn expire_unlinks_once_and_reloads_repeat() -> c_int {
    let mut once = TimerEntry::once(1, noop, ptr::null_mut(), 0);
    let mut repeat = TimerEntry::repeat(2, noop, ptr::null_mut(), 3);
    repeat.ticks_left = 0;

    let mut list = TimerList::new();
    list.push_front(&mut once as *mut TimerEntry);
    list.push_front(&mut repeat as *mut TimerEntry);

    let mut ready_ids = [0u32; 4];
    let mut n = 0;
    list.expire(None, |entry, _was_alarm| {
        ready_ids[n] = unsafe { (*entry).id };
        n += 1;
    });

    assert_eq_test!(n, 2);
    // Repeat reloads and stays on the list; Once is unlinked.
    assert_eq_test!(repeat.ticks_left, repeat.ticks_init);
    assert_test!(!list.is_empty());
    0
}

fn expire_traversal_survives_consecutive_unlinks() -> c_int {
    // Three Once entries all due to expire on the same tick, pushed so the
    // first two visited are unlinked back-to-back. The fixed traversal must
    // still reach the third: the cursor only advances when nothing was
    // unlinked this iteration, re-reading `*link` (now the successor)
    // otherwise -- the buggy version instead advanced through the
    // unlinked node's stale `next` pointer and skipped it.
    let mut a = TimerEntry::once(1, noop, ptr::null_mut(), 0);
    let mut b = TimerEntry::once(2, noop, ptr::null_mut(), 0);
    let mut c = TimerEntry::once(3, noop, ptr::null_mut(), 0);

    let mut list = TimerList::new();
    list.push_front(&mut a as *mut TimerEntry);
    list.push_front(&mut b as *mut TimerEntry);
    list.push_front(&mut c as *mut TimerEntry);

    let mut fired = [false; 4];
    list.expire(None, |entry, _| {
        let id = unsafe { (*entry).id } as usize;
        fired[id] = true;
    });

    assert_test!(fired[1]);
    assert_test!(fired[2]);
    assert_test!(fired[3]);
    assert_test!(list.is_empty());
    0
}

fn expire_alarm_fires_only_on_exact_match() -> c_int {
    let target = WallClock {
        hours: 11,
        minutes: 0,
        seconds: 0,
    };
    let mut entry = TimerEntry::alarm(9, noop, ptr::null_mut(), target);
    let mut list = TimerList::new();
    list.push_front(&mut entry as *mut TimerEntry);

    let mismatch = WallClock {
        hours: 10,
        minutes: 59,
        seconds: 58,
    };
    let mut fired = false;
    list.expire(Some(mismatch), |_, _| fired = true);
    assert_test!(!fired);
    assert_test!(!list.is_empty());

    list.expire(Some(target), |entry, was_alarm| {
        fired = true;
        assert_test!(was_alarm);
        let _ = entry;
    });
    assert_test!(fired);
    assert_test!(list.is_empty());
    0
}

define_test_suite!(
    timer_list,
    [
        push_front_splices_at_head_in_lifo_order,
        age_decrements_once_and_repeat_but_not_alarm,
        age_never_underflows_at_zero,
        unlink_by_id_marks_disabled_and_reports_alarm,
        unlink_by_id_missing_returns_none,
        expire_unlinks_once_and_reloads_repeat,
        expire_traversal_survives_consecutive_unlinks,
        expire_alarm_fires_only_on_exact_match,
    ]
);
