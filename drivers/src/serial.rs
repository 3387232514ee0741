//! 16550-compatible UART driver for COM1, used as the klog backend once boot
//! has progressed far enough to install it (see [`init`]).

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};

use rtcsched_lib::cpu;
use rtcsched_lib::io::Port;
use rtcsched_lib::ports::{
    COM1, UART_FCR_14_BYTE_THRESHOLD as FCR_14_BYTE_THRESHOLD, UART_FCR_CLEAR_RX as FCR_CLEAR_RX,
    UART_FCR_CLEAR_TX as FCR_CLEAR_TX, UART_FCR_ENABLE_FIFO as FCR_ENABLE_FIFO,
    UART_IIR_FIFO_ENABLED as IIR_FIFO_ENABLED, UART_IIR_FIFO_MASK as IIR_FIFO_MASK,
    UART_LCR_DLAB as LCR_DLAB, UART_MCR_AUX2 as MCR_AUX2, UART_MCR_DTR as MCR_DTR,
    UART_MCR_RTS as MCR_RTS, UART_REG_IER as REG_IER, UART_REG_IIR as REG_IIR,
    UART_REG_LCR as REG_LCR, UART_REG_MCR as REG_MCR, UART_REG_RBR as REG_RBR,
    UART_REG_SCR as REG_SCR,
};
use rtcsched_lib::{IrqMutex, klog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartType {
    Uart16450,
    Uart16550,
    Uart16550A,
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct UartCapabilities {
    pub uart_type: UartType,
    pub has_fifo: bool,
    pub fifo_working: bool,
    pub fifo_size: usize,
}

static SERIAL: IrqMutex<SerialPort> = IrqMutex::new(SerialPort::new(COM1));

/// Detect and program the COM1 UART, then install it as the klog backend in
/// place of the early-boot raw-port fallback.
pub fn init() {
    let mut port = SERIAL.lock();
    unsafe { port.init() }
    drop(port);

    klog::klog_register_backend(serial_klog_backend);
}

/// `IrqMutex` assumes ordinary task context; the klog backend must also be
/// safe to call with the RTC periodic interrupt still firing, so it takes
/// its own lock built from nothing but `cli`/`sti` and an `AtomicBool`.
static KLOG_LOCK: AtomicBool = AtomicBool::new(false);

fn serial_klog_backend(args: fmt::Arguments<'_>) {
    let saved_flags = cpu::save_flags_cli();
    while KLOG_LOCK
        .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
        .is_err()
    {
        core::hint::spin_loop();
    }

    struct KlogWriter;
    impl fmt::Write for KlogWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            unsafe { rtcsched_lib::ports::serial_write_bytes(COM1, s.as_bytes()) };
            Ok(())
        }
    }

    let _ = fmt::write(&mut KlogWriter, args);
    let _ = KlogWriter.write_str("\n");

    KLOG_LOCK.store(false, Ordering::Release);
    cpu::restore_flags(saved_flags);
}

pub fn get_capabilities() -> UartCapabilities {
    SERIAL.lock().capabilities()
}

pub fn write_str(s: &str) {
    let _ = SERIAL.lock().write_str(s);
}

pub fn write_line(s: &str) {
    let mut guard = SERIAL.lock();
    let _ = guard.write_str(s);
    let _ = guard.write_str("\r\n");
}

pub fn print_args(args: fmt::Arguments<'_>) {
    let _ = SERIAL.lock().write_fmt(args);
}

struct SerialPort {
    base: Port<u8>,
    caps: UartCapabilities,
}

impl SerialPort {
    const fn new(base: Port<u8>) -> Self {
        Self {
            base,
            caps: UartCapabilities {
                uart_type: UartType::Unknown,
                has_fifo: false,
                fifo_working: false,
                fifo_size: 0,
            },
        }
    }

    #[inline]
    fn reg(&self, offset: u16) -> Port<u8> {
        self.base.offset(offset)
    }

    unsafe fn detect_uart(&mut self) -> UartCapabilities {
        self.reg(REG_IIR)
            .write(FCR_ENABLE_FIFO | FCR_CLEAR_RX | FCR_CLEAR_TX);

        for _ in 0..10 {
            core::hint::spin_loop();
        }

        let iir_after = self.reg(REG_IIR).read();
        let has_fifo = (iir_after & IIR_FIFO_MASK) == IIR_FIFO_ENABLED;

        self.reg(REG_IIR).write(0);

        if !has_fifo {
            return UartCapabilities {
                uart_type: UartType::Uart16450,
                has_fifo: false,
                fifo_working: false,
                fifo_size: 0,
            };
        }

        let test_value = 0xAA;
        self.reg(REG_SCR).write(test_value);
        let scratch_read = self.reg(REG_SCR).read();
        let fifo_working = scratch_read == test_value;

        UartCapabilities {
            uart_type: if fifo_working {
                UartType::Uart16550A
            } else {
                UartType::Uart16550
            },
            has_fifo: true,
            fifo_working,
            fifo_size: 16,
        }
    }

    unsafe fn init(&mut self) {
        self.caps = self.detect_uart();

        self.reg(REG_IER).write(0x00);
        self.reg(REG_LCR).write(LCR_DLAB);
        self.reg(REG_RBR).write(0x01);
        self.reg(REG_IER).write(0x00);
        self.reg(REG_LCR).write(0x03);

        if self.caps.has_fifo {
            if self.caps.fifo_working {
                self.reg(REG_IIR)
                    .write(FCR_ENABLE_FIFO | FCR_CLEAR_RX | FCR_CLEAR_TX | FCR_14_BYTE_THRESHOLD);
            } else {
                self.reg(REG_IIR)
                    .write(FCR_ENABLE_FIFO | FCR_CLEAR_RX | FCR_CLEAR_TX);
            }
        }

        self.reg(REG_MCR).write(MCR_DTR | MCR_RTS | MCR_AUX2);
    }

    pub fn capabilities(&self) -> UartCapabilities {
        self.caps
    }
}

impl Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        unsafe { rtcsched_lib::ports::serial_write_bytes(self.base, s.as_bytes()) };
        Ok(())
    }
}
