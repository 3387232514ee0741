//! Worker task (bottom half): drains `ready_queue` and runs callbacks.
//!
//! The only domain that allocates or frees timer entries, and the only one
//! that invokes user callbacks. Runs as a single long-lived, high-priority
//! task with interrupts enabled; callbacks are serialized by construction
//! since this loop never runs two at once.

use rtcsched_lib::klog_trace;

use crate::api::IDS;
use crate::handler::READY_QUEUE;
use crate::id_alloc::TimerId;
use crate::pool::POOL;
use crate::timer_list::Mode;

/// Block on `ready_queue`, run one entry's callback (unless it was
/// cancelled), and free it unless it should remain on the pending list.
/// Returns the freed entry's id, or `None` for a `Repeat` entry that stays
/// alive.
pub fn run_one() -> Option<TimerId> {
    let ptr = READY_QUEUE.get();
    // SAFETY: the handler only ever publishes a pointer once, and ownership
    // transfers to this task at that point -- nothing else can be holding it.
    let entry = unsafe { &mut *ptr };

    if entry.mode != Mode::Disabled {
        (entry.callback)(entry.arg);
    } else {
        klog_trace!("rtc: worker dropping cancelled entry id={}", entry.id);
    }

    if entry.mode == Mode::Repeat {
        return None;
    }

    let id = entry.id;
    // This is the one place that returns a slot to the pool; the handler
    // never unlinks an entry without eventually routing it through here.
    POOL.free(ptr);
    IDS.free(id);
    Some(id)
}

/// The worker task's body: loop forever, draining `ready_queue`. Shaped as
/// `fn(*mut c_void) -> !` to match the host kernel's task-creation
/// primitive; the argument is unused.
pub extern "C" fn task_main(_arg: *mut core::ffi::c_void) -> ! {
    loop {
        run_one();
    }
}
