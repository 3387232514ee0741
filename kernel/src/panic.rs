//! Panic handler: log the message and location, then halt.
//!
//! Minus the panic-recovery/test-harness hooks a whole-OS panic path would
//! carry for its suite-isolation machinery -- not part of this subsystem.

use core::panic::PanicInfo;

use rtcsched_lib::{cpu, klog_error};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    if let Some(location) = info.location() {
        klog_error!(
            "panic at {}:{}:{}: {}",
            location.file(),
            location.line(),
            location.column(),
            info.message()
        );
    } else {
        klog_error!("panic: {}", info.message());
    }
    cpu::halt_loop();
}
