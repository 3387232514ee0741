//! Hardware-independent regression tests for BCD and 12-hour decoding.

use core::ffi::c_int;

use rtcsched_lib::{assert_eq_test, define_test_suite};

use crate::cmos::{StatusB, WallClock, bcd_to_bin, decode_wall_clock};

fn bcd_round_trip() -> c_int {
    assert_eq_test!(bcd_to_bin(0x59), 59);
    assert_eq_test!(bcd_to_bin(0x00), 0);
    assert_eq_test!(bcd_to_bin(0x23), 23);
    0
}

fn decode_24h_bcd_matches_raw() -> c_int {
    let fmt = StatusB::HOUR_FORMAT_24;
    let got = decode_wall_clock(0x59, 0x30, 0x21, fmt);
    assert_eq_test!(
        got,
        WallClock {
            hours: 21,
            minutes: 30,
            seconds: 59,
        }
    );
    0
}

fn decode_24h_binary_matches_raw() -> c_int {
    let fmt = StatusB::HOUR_FORMAT_24 | StatusB::BINARY_MODE;
    let got = decode_wall_clock(45, 12, 9, fmt);
    assert_eq_test!(
        got,
        WallClock {
            hours: 9,
            minutes: 12,
            seconds: 45,
        }
    );
    0
}

fn decode_12h_pm_wraps_modulo_24() -> c_int {
    // 11:00:00 PM in BCD with the PM flag (bit 7) set on the hours byte.
    let fmt = StatusB::empty();
    let got = decode_wall_clock(0x00, 0x00, 0x80 | 0x11, fmt);
    assert_eq_test!(got.hours, 23);

    // 12:00:00 PM (noon) decodes via the same `% 24`: (12 + 12) % 24 == 0,
    // not the bitwise-AND typo's `& 24` (which would also give 0 here, but
    // for the wrong reason -- see the mismatch this formula avoids for
    // other hours, exercised above).
    let got = decode_wall_clock(0x00, 0x00, 0x80 | 0x12, fmt);
    assert_eq_test!(got.hours, 0);
    0
}

fn decode_12h_am_passes_through() -> c_int {
    let fmt = StatusB::empty();
    let got = decode_wall_clock(0x00, 0x00, 0x07, fmt);
    assert_eq_test!(got.hours, 7);
    0
}

define_test_suite!(
    cmos,
    [
        bcd_round_trip,
        decode_24h_bcd_matches_raw,
        decode_24h_binary_matches_raw,
        decode_12h_pm_wraps_modulo_24,
        decode_12h_am_passes_through,
    ]
);
