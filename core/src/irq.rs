//! RTC interrupt dispatch.
//!
//! Owns the one IDT entry this subsystem needs (the legacy IRQ8 vector the
//! RTC's periodic interrupt arrives on) and a tiny registry so the concrete
//! interrupt-controller driver (8259 PIC, in `drivers`) can plug in its
//! mask/unmask/EOI operations without `core` ever depending on `drivers` —
//! preserving the one-way "drivers -> core" dependency used throughout this
//! codebase.
//!
//! The IDT itself is owned by the host kernel, not by this module: a CPU has
//! exactly one active IDT, and a kernel built around this subsystem needs
//! vectors for CPU exceptions too, which are out of scope here. [`install`]
//! just fills in this subsystem's one entry in a table the kernel builds,
//! loads, and keeps alive for `'static`.

use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame};

use rtcsched_lib::{IrqMutex, klog_debug};

/// Legacy IRQ8: CMOS RTC, cascaded through the slave 8259.
pub const RTC_IRQ_LINE: u8 = 8;
/// Vector the slave PIC is remapped to land IRQ8 on (see `drivers::pic`).
pub const RTC_VECTOR: u8 = 0x28;

pub type IrqHandler = fn();

#[derive(Clone, Copy)]
pub struct ControllerOps {
    pub eoi: fn(u8),
    pub mask: fn(u8),
    pub unmask: fn(u8),
}

struct IrqState {
    handler: Option<IrqHandler>,
    controller: Option<ControllerOps>,
}

static STATE: IrqMutex<IrqState> = IrqMutex::new(IrqState {
    handler: None,
    controller: None,
});

/// Register the interrupt controller driver's operations. Called once by
/// `drivers::pic::init()`.
pub fn register_controller(ops: ControllerOps) {
    STATE.lock().controller = Some(ops);
}

/// Register the handler that runs on every RTC tick. Called once during
/// subsystem initialization, before the line is unmasked.
pub fn register_handler(handler: IrqHandler) {
    STATE.lock().handler = Some(handler);
}

/// Unmask the RTC line at the interrupt controller.
pub fn enable_rtc_line() {
    if let Some(ops) = STATE.lock().controller {
        (ops.unmask)(RTC_IRQ_LINE);
    }
}

extern "x86-interrupt" fn rtc_isr(_frame: InterruptStackFrame) {
    let (handler, controller) = {
        let state = STATE.lock();
        (state.handler, state.controller)
    };
    if let Some(handler) = handler {
        handler();
    }
    if let Some(ops) = controller {
        (ops.eoi)(RTC_IRQ_LINE);
    }
}

/// Wire vector `RTC_VECTOR` to `rtc_isr` in a kernel-owned IDT.
///
/// Must be called before the kernel loads `idt`, and after the PIC has been
/// remapped (so `RTC_VECTOR` doesn't alias a CPU exception).
pub fn install(idt: &mut InterruptDescriptorTable) {
    idt[RTC_VECTOR as usize].set_handler_fn(rtc_isr);
    klog_debug!("irq: vector {:#x} -> rtc_isr", RTC_VECTOR);
}

pub fn is_handler_registered() -> bool {
    STATE.lock().handler.is_some()
}
