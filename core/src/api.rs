//! Public API: `Timed`, `Repeat`, `Alarm`, `Cancel`, `GetTime`.
//!
//! Each creation call validates its arguments, takes a slot from the entry
//! pool, assigns an id, and publishes the entry to `new_queue`. Any failure
//! after the id was assigned rolls the id back before returning an error --
//! no entry is ever left half-registered.

use core::ffi::c_void;

use rtcsched_lib::{klog_error, klog_warn};

use crate::cmos::{self, WallClock};
use crate::config::MAX_SECS;
use crate::error::RtcError;
use crate::handler::{CANCEL_QUEUE, NEW_QUEUE};
use crate::id_alloc::{IdAllocator, TimerId};
use crate::pool::POOL;
use crate::timer_list::{TimerCallback, TimerEntry};

pub(crate) static IDS: IdAllocator = IdAllocator::new();

fn publish(id: TimerId, entry: TimerEntry) -> Result<TimerId, RtcError> {
    let ptr = match POOL.alloc(entry) {
        Some(ptr) => ptr,
        None => {
            IDS.free(id);
            klog_error!("rtc: entry pool exhausted, rejecting id={}", id);
            return Err(RtcError::Mem);
        }
    };
    if !NEW_QUEUE.try_put(ptr) {
        // SAFETY: nothing else has observed `ptr` yet -- the pool handed it
        // to us and it never reached the handler.
        POOL.free(ptr);
        IDS.free(id);
        klog_warn!("rtc: new_queue full, rejecting id={}", id);
        return Err(RtcError::Add);
    }
    Ok(id)
}

fn alloc_id() -> Result<TimerId, RtcError> {
    // The allocator itself can only run out if the free list and the
    // monotonic counter both saturate; treated as a registration failure.
    IDS.alloc().ok_or_else(|| {
        klog_error!("rtc: id allocator exhausted");
        RtcError::Mem
    })
}

/// Register a one-shot callback to fire `seconds` from now.
pub fn timed(callback: TimerCallback, arg: *mut c_void, seconds: u32) -> Result<TimerId, RtcError> {
    if seconds == 0 {
        klog_warn!("rtc: timed() rejected seconds=0");
        return Err(RtcError::Fmt);
    }
    if seconds > MAX_SECS {
        klog_warn!("rtc: timed() rejected seconds={} (max {})", seconds, MAX_SECS);
        return Err(RtcError::Add);
    }
    let id = alloc_id()?;
    let ticks = seconds * crate::config::TICKS_PER_SECOND;
    publish(id, TimerEntry::once(id, callback, arg, ticks))
}

/// Register a callback that repeats every `seconds`.
pub fn repeat(callback: TimerCallback, arg: *mut c_void, seconds: u32) -> Result<TimerId, RtcError> {
    if seconds == 0 {
        klog_warn!("rtc: repeat() rejected seconds=0");
        return Err(RtcError::Fmt);
    }
    if seconds > MAX_SECS {
        klog_warn!("rtc: repeat() rejected seconds={} (max {})", seconds, MAX_SECS);
        return Err(RtcError::Add);
    }
    let id = alloc_id()?;
    let ticks = seconds * crate::config::TICKS_PER_SECOND;
    publish(id, TimerEntry::repeat(id, callback, arg, ticks))
}

/// Register a callback to fire once the wall clock reaches `{h, m, s}`.
pub fn alarm(callback: TimerCallback, arg: *mut c_void, at: WallClock) -> Result<TimerId, RtcError> {
    if at.hours >= 24 || at.minutes >= 60 || at.seconds >= 60 {
        klog_warn!(
            "rtc: alarm() rejected out-of-range time {:02}:{:02}:{:02}",
            at.hours,
            at.minutes,
            at.seconds
        );
        return Err(RtcError::Fmt);
    }
    let id = alloc_id()?;
    publish(id, TimerEntry::alarm(id, callback, arg, at))
}

/// Request cancellation of a previously registered entry. Best-effort: a
/// concurrent expiration may still fire the callback once if it reaches
/// `ready_queue` first (see module docs on the handler).
pub fn cancel(id: i64) -> Result<(), RtcError> {
    if id < 1 {
        klog_warn!("rtc: cancel() rejected non-positive id={}", id);
        return Err(RtcError::Id);
    }
    if !CANCEL_QUEUE.try_put(id as TimerId) {
        klog_warn!("rtc: cancel_queue full, dropping cancel for id={}", id);
        return Err(RtcError::Add);
    }
    Ok(())
}

/// Sample the current wall clock. Never fails.
pub fn get_time() -> WallClock {
    cmos::read_wall_clock()
}

/// Setting the hardware clock or its date, and reading the date back, are
/// out of scope for this subsystem; these are stubs so callers linking
/// against the full entry-point surface still resolve. Callers should not
/// depend on them doing anything.
pub fn rtc_set_time(_at: WallClock) {}
pub fn rtc_set_date(_year: u16, _month: u8, _day: u8) {}
pub fn rtc_get_date() -> (u16, u8, u8) {
    (0, 0, 0)
}

pub mod ffi {
    //! `extern "C"` shims over the `Result`-returning API above, for
    //! callers outside the Rust boundary. Negative returns are
    //! `RtcError::code()`; non-negative returns are ids (or `0` for
    //! `Cancel`'s success case).

    use core::ffi::c_void;

    use crate::cmos::WallClock;
    use crate::timer_list::TimerCallback;

    #[repr(C)]
    pub struct CWallClock {
        pub hours: u8,
        pub minutes: u8,
        pub seconds: u8,
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn rtc_timed(callback: TimerCallback, arg: *mut c_void, seconds: u32) -> i64 {
        match super::timed(callback, arg, seconds) {
            Ok(id) => id as i64,
            Err(err) => err.code() as i64,
        }
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn rtc_repeat(callback: TimerCallback, arg: *mut c_void, seconds: u32) -> i64 {
        match super::repeat(callback, arg, seconds) {
            Ok(id) => id as i64,
            Err(err) => err.code() as i64,
        }
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn rtc_alarm(callback: TimerCallback, arg: *mut c_void, hours: u8, minutes: u8, seconds: u8) -> i64 {
        let at = WallClock {
            hours,
            minutes,
            seconds,
        };
        match super::alarm(callback, arg, at) {
            Ok(id) => id as i64,
            Err(err) => err.code() as i64,
        }
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn rtc_cancel(id: i64) -> i32 {
        match super::cancel(id) {
            Ok(()) => 0,
            Err(err) => err.code(),
        }
    }

    #[unsafe(no_mangle)]
    pub extern "C" fn rtc_get_time(out: *mut CWallClock) {
        let clock = super::get_time();
        // SAFETY: caller supplies a valid, writable `CWallClock` pointer --
        // same contract as the rest of this crate's `extern "C"` surface.
        unsafe {
            (*out).hours = clock.hours;
            (*out).minutes = clock.minutes;
            (*out).seconds = clock.seconds;
        }
    }
}
