//! One-time subsystem bring-up.
//!
//! Programs the CMOS registers for a 1024 Hz periodic interrupt and unmasks
//! IRQ8 at the interrupt controller. The host kernel is responsible for
//! calling [`irq::install`] into its own IDT and loading it *before* this
//! runs (see `kernel::idt`), and for spawning the worker task and enabling
//! interrupts globally afterwards; see `worker::task_main`.

use rtcsched_lib::cpu;

use crate::cmos::{self, StatusB};
use crate::handler;
use crate::irq::{self, ControllerOps};

/// Bring the subsystem up. Must run once, after the kernel's IDT (with
/// `irq::install` already applied) is loaded, before interrupts are
/// globally enabled, and before anything calls into the public API.
///
/// `controller` is the interrupt-controller driver's eoi/mask/unmask
/// operations (see [`ControllerOps`]) -- owned by `drivers`, passed in here
/// so `core` never depends on it directly.
pub fn init(controller: ControllerOps) {
    irq::register_controller(controller);
    irq::register_handler(handler::on_tick);

    let flags = cpu::save_flags_cli();
    cmos::set_periodic_rate_1024hz();
    let mut format = cmos::status_b();
    format.insert(StatusB::PERIODIC_IRQ);
    cmos::set_status_b(format);
    cpu::restore_flags(flags);

    irq::enable_rtc_line();
}
