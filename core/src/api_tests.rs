//! Boundary tests for the public API: argument validation that must return
//! an error before ever touching the id allocator or the queues, so these
//! are safe to run independent of subsystem init.

use core::ffi::c_int;
use core::ptr;

use rtcsched_lib::{assert_eq_test, define_test_suite};

use crate::api;
use crate::cmos::WallClock;
use crate::config::MAX_SECS;
use crate::error::RtcError;

extern "C" fn noop(_arg: *mut core::ffi::c_void) {}

fn timed_zero_seconds_is_fmt_error() -> c_int {
    let result = api::timed(noop, ptr::null_mut(), 0);
    assert_eq_test!(result, Err(RtcError::Fmt));
    0
}

fn timed_over_max_secs_is_add_error() -> c_int {
    let result = api::timed(noop, ptr::null_mut(), MAX_SECS + 1);
    assert_eq_test!(result, Err(RtcError::Add));
    0
}

fn repeat_zero_seconds_is_fmt_error() -> c_int {
    let result = api::repeat(noop, ptr::null_mut(), 0);
    assert_eq_test!(result, Err(RtcError::Fmt));
    0
}

fn alarm_hour_out_of_range_is_fmt_error() -> c_int {
    let at = WallClock {
        hours: 24,
        minutes: 0,
        seconds: 0,
    };
    let result = api::alarm(noop, ptr::null_mut(), at);
    assert_eq_test!(result, Err(RtcError::Fmt));
    0
}

fn alarm_minute_out_of_range_is_fmt_error() -> c_int {
    let at = WallClock {
        hours: 0,
        minutes: 60,
        seconds: 0,
    };
    let result = api::alarm(noop, ptr::null_mut(), at);
    assert_eq_test!(result, Err(RtcError::Fmt));
    0
}

fn cancel_zero_is_id_error() -> c_int {
    assert_eq_test!(api::cancel(0), Err(RtcError::Id));
    0
}

fn cancel_negative_is_id_error() -> c_int {
    assert_eq_test!(api::cancel(-5), Err(RtcError::Id));
    0
}

define_test_suite!(
    api_boundaries,
    [
        timed_zero_seconds_is_fmt_error,
        timed_over_max_secs_is_add_error,
        repeat_zero_seconds_is_fmt_error,
        alarm_hour_out_of_range_is_fmt_error,
        alarm_minute_out_of_range_is_fmt_error,
        cancel_zero_is_id_error,
        cancel_negative_is_id_error,
    ]
);
