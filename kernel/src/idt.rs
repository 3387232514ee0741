//! The kernel's one Interrupt Descriptor Table.
//!
//! A CPU has exactly one active IDT, so ownership lives here rather than in
//! any one subsystem: this module builds the table, wires the handful of CPU
//! exception vectors this kernel cares about (see [`crate::exceptions`]),
//! lets `rtcsched_core::irq` fill in its one IRQ vector, and loads it.
//!
//! A fuller kernel built for the same hardware builds a much larger
//! hand-rolled table (32 exception vectors, 16 legacy IRQs, IPI/syscall
//! vectors, assembly ISR trampolines) backing a multi-core scheduler. This
//! kernel has one IRQ source and no SMP, so it uses the `x86_64` crate's
//! safe `InterruptDescriptorTable` builder instead of hand-written ISR
//! stubs -- the crate is already part of this workspace's dependency stack
//! (`core::irq` uses the same types).

use spin::Once;
use x86_64::structures::idt::InterruptDescriptorTable;

use crate::exceptions;

static IDT: Once<InterruptDescriptorTable> = Once::new();

/// Build and load the IDT. Must run once, after the PIC has been remapped
/// (see `rtcsched_drivers::pic::init`) so vector numbers don't collide with
/// CPU exceptions, and before interrupts are enabled globally.
pub fn init() {
    let idt = IDT.call_once(|| {
        let mut idt = InterruptDescriptorTable::new();
        exceptions::install(&mut idt);
        rtcsched_core::irq::install(&mut idt);
        idt
    });
    idt.load();
}
