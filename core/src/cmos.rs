//! CMOS real-time-clock port layer and wall-clock reader.
//!
//! Two ports, index (0x70) and data (0x71): write a register number to the
//! index port, then read or write the data port. Every access must disable
//! interrupts around the pair — an interrupt landing between the index
//! write and the data read/write would see another register entirely.

use rtcsched_lib::cpu::{restore_flags, save_flags_cli};
use rtcsched_lib::ports::{CMOS_ADDRESS, CMOS_DATA};

const REG_SECONDS: u8 = 0x00;
const REG_MINUTES: u8 = 0x02;
const REG_HOURS: u8 = 0x04;
const REG_STATUS_A: u8 = 0x0A;
const REG_STATUS_B: u8 = 0x0B;
const REG_STATUS_C: u8 = 0x0C;

const STATUS_A_UPDATE_IN_PROGRESS: u8 = 1 << 7;

bitflags::bitflags! {
    /// Register B: interrupt enables and the two format bits that change
    /// how register A/B/C and the time registers must be interpreted.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct StatusB: u8 {
        const DAYLIGHT_SAVINGS   = 1 << 0;
        const HOUR_FORMAT_24     = 1 << 1;
        const BINARY_MODE        = 1 << 2;
        const SQUARE_WAVE        = 1 << 3;
        const UPDATE_ENDED_IRQ   = 1 << 4;
        const ALARM_IRQ          = 1 << 5;
        const PERIODIC_IRQ       = 1 << 6;
        const SET                = 1 << 7;
    }
}

bitflags::bitflags! {
    /// Register C: which interrupt(s) fired since last read. Reading C
    /// clears it — the handler must read it every tick to re-arm the PIE.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct StatusC: u8 {
        const UPDATE_ENDED = 1 << 4;
        const ALARM        = 1 << 5;
        const PERIODIC     = 1 << 6;
        const IRQF         = 1 << 7;
    }
}

/// Read one CMOS register with interrupts disabled across index+data.
pub fn read(reg: u8) -> u8 {
    let flags = save_flags_cli();
    let value = unsafe {
        CMOS_ADDRESS.write(reg);
        CMOS_DATA.read()
    };
    restore_flags(flags);
    value
}

/// Write one CMOS register with interrupts disabled across index+data.
pub fn write(reg: u8, value: u8) {
    let flags = save_flags_cli();
    unsafe {
        CMOS_ADDRESS.write(reg);
        CMOS_DATA.write(value);
    }
    restore_flags(flags);
}

pub fn status_b() -> StatusB {
    StatusB::from_bits_truncate(read(REG_STATUS_B))
}

pub fn set_status_b(value: StatusB) {
    write(REG_STATUS_B, value.bits());
}

/// Read and clear register C. Must be called once per periodic interrupt
/// or the RTC stops asserting IRQ8 after the first tick.
pub fn read_and_clear_status_c() -> StatusC {
    StatusC::from_bits_truncate(read(REG_STATUS_C))
}

/// Program register A's divider for a periodic-interrupt rate of 1024 Hz
/// (rate select 6, per the MC146818 datasheet: 32768 Hz / 2^(rate-1)).
pub fn set_periodic_rate_1024hz() {
    const OSCILLATOR_ENABLE: u8 = 0x20;
    const RATE_1024HZ: u8 = 0x06;
    write(REG_STATUS_A, OSCILLATOR_ENABLE | RATE_1024HZ);
}

fn update_in_progress() -> bool {
    read(REG_STATUS_A) & STATUS_A_UPDATE_IN_PROGRESS != 0
}

pub fn bcd_to_bin(value: u8) -> u8 {
    (value & 0x0F) + (value >> 4) * 10
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WallClock {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// Read the wall clock, retrying the snapshot until two consecutive reads
/// agree (guards against tearing across the once-a-second register
/// update) and decoding BCD / 12-hour format per register B.
pub fn read_wall_clock() -> WallClock {
    while update_in_progress() {
        core::hint::spin_loop();
    }

    let mut last = raw_snapshot();
    loop {
        while update_in_progress() {
            core::hint::spin_loop();
        }
        let next = raw_snapshot();
        if next == last {
            break;
        }
        last = next;
    }

    decode_wall_clock(last.0, last.1, last.2, status_b())
}

fn raw_snapshot() -> (u8, u8, u8) {
    (read(REG_SECONDS), read(REG_MINUTES), read(REG_HOURS))
}

/// Decode a raw `(seconds, minutes, hours)` register snapshot per register
/// B's format bits. Pulled out of [`read_wall_clock`] as a pure function so
/// the BCD and 12-hour conversions can be exercised without touching
/// hardware.
///
/// The 12-hour PM conversion is `(hours + 12) % 24` -- not a bitwise AND,
/// which would corrupt every hour whose low bits overlap `0x18`.
pub fn decode_wall_clock(mut seconds: u8, mut minutes: u8, mut hours: u8, fmt: StatusB) -> WallClock {
    let pm = hours & 0x80 != 0;
    hours &= 0x7F;

    if !fmt.contains(StatusB::BINARY_MODE) {
        seconds = bcd_to_bin(seconds);
        minutes = bcd_to_bin(minutes);
        hours = bcd_to_bin(hours);
    }

    if pm && !fmt.contains(StatusB::HOUR_FORMAT_24) {
        hours = (hours + 12) % 24;
    }

    WallClock {
        hours,
        minutes,
        seconds,
    }
}
