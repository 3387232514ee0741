#![no_std]
#![no_main]

mod boot;
mod exceptions;
mod idt;
mod panic;

use rtcsched_core::irq::ControllerOps;
use rtcsched_lib::{cpu, klog_info, klog_init};

/// Limine hands control to the ELF entry point already in 64-bit long mode
/// with a valid stack -- no assembly trampoline is needed, unlike a
/// multi-core boot path that sets up its own GDT/TSS/IST stacks first.
#[unsafe(no_mangle)]
extern "C" fn _start() -> ! {
    boot::ensure_base_revision_supported();

    rtcsched_drivers::serial::init();
    klog_init();
    klog_info!("rtcsched: boot");

    rtcsched_drivers::pic::init();
    idt::init();

    rtcsched_core::init::init(ControllerOps {
        eoi: rtcsched_drivers::pic::send_eoi,
        mask: rtcsched_drivers::pic::mask,
        unmask: rtcsched_drivers::pic::unmask,
    });

    cpu::enable_interrupts();

    #[cfg(feature = "itests")]
    {
        let all_passed = rtcsched_core::selftest::run_all();
        let code: u8 = if all_passed { 0x10 } else { 0x11 };
        unsafe { rtcsched_lib::ports::QEMU_DEBUG_EXIT.write(code) };
        cpu::halt_loop();
    }

    #[cfg(not(feature = "itests"))]
    {
        klog_info!("rtcsched: entering worker loop");
        rtcsched_core::worker::task_main(core::ptr::null_mut());
    }
}
