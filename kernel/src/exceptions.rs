//! CPU exception handlers.
//!
//! This subsystem's only interrupt source is the RTC (see
//! `rtcsched_core::irq`); these vectors exist purely so a misbehaving boot
//! sequence or a bug in the scheduler itself produces a log line instead of
//! a silent reset. No recovery is attempted -- every handler logs the
//! faulting frame and halts.
//!
//! A fuller kernel backs these same vectors with per-fault recovery paths
//! (page-fault demand paging, GP fault task termination, and so on) that
//! assume a live scheduler and address-space model this kernel doesn't
//! have.

use x86_64::structures::idt::{InterruptDescriptorTable, InterruptStackFrame, PageFaultErrorCode};

use rtcsched_lib::{cpu, klog_error};

pub fn install(idt: &mut InterruptDescriptorTable) {
    idt.divide_error.set_handler_fn(divide_error);
    idt.invalid_opcode.set_handler_fn(invalid_opcode);
    idt.general_protection_fault.set_handler_fn(general_protection_fault);
    idt.page_fault.set_handler_fn(page_fault);
    idt.double_fault.set_handler_fn(double_fault);
}

extern "x86-interrupt" fn divide_error(frame: InterruptStackFrame) {
    klog_error!("exception: divide error at {:#x}", frame.instruction_pointer);
    cpu::halt_loop();
}

extern "x86-interrupt" fn invalid_opcode(frame: InterruptStackFrame) {
    klog_error!("exception: invalid opcode at {:#x}", frame.instruction_pointer);
    cpu::halt_loop();
}

extern "x86-interrupt" fn general_protection_fault(frame: InterruptStackFrame, error_code: u64) {
    klog_error!(
        "exception: general protection fault (error code {:#x}) at {:#x}",
        error_code,
        frame.instruction_pointer
    );
    cpu::halt_loop();
}

extern "x86-interrupt" fn page_fault(frame: InterruptStackFrame, error_code: PageFaultErrorCode) {
    let fault_addr = x86_64::registers::control::Cr2::read_raw();
    klog_error!(
        "exception: page fault accessing {:#x} ({:?}) at {:#x}",
        fault_addr,
        error_code,
        frame.instruction_pointer
    );
    cpu::halt_loop();
}

extern "x86-interrupt" fn double_fault(frame: InterruptStackFrame, _error_code: u64) -> ! {
    klog_error!("exception: double fault at {:#x}", frame.instruction_pointer);
    cpu::halt_loop();
}
