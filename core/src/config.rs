//! Tunable constants. Queue capacity is fixed at 30 for all three queues;
//! callers needing a different burst tolerance can change this in one
//! place.

/// Tick rate the RTC's periodic interrupt is programmed for: 1024 Hz.
pub const TICKS_PER_SECOND: u32 = 1024;

/// Largest `seconds` argument `Timed`/`Repeat` will accept without the
/// resulting tick count overflowing `u32`.
pub const MAX_SECS: u32 = (u32::MAX) / TICKS_PER_SECOND;

/// Capacity of `new_queue`, `cancel_queue`, and `ready_queue`.
pub const QUEUE_CAPACITY: usize = 30;

/// Number of timer entries that can be live (registered but not yet fired
/// and freed) at once. Backs the fixed-capacity entry pool in `pool`.
pub const MAX_TIMER_ENTRIES: usize = 256;
