//! Bounded FIFO message queue.
//!
//! Concrete stand-in for the "bounded FIFO message queue" the scheduler's
//! design assumes the host kernel provides. Built from the three primitives
//! already in this crate: a fixed-capacity [`RingBuffer`] for storage, an
//! [`IrqMutex`] guarding it against concurrent producers/consumers, and a
//! [`WaitQueue`] so a blocking `get` can park instead of spinning.

use crate::ring_buffer::RingBuffer;
use crate::spinlock::IrqMutex;
use crate::waitqueue::WaitQueue;

pub struct MsgQueue<T, const N: usize> {
    buf: IrqMutex<RingBuffer<T, N>>,
    readers: WaitQueue,
}

impl<T: Copy + Default, const N: usize> MsgQueue<T, N> {
    pub const fn new(empty: T) -> Self
    where
        T: Copy,
    {
        Self {
            buf: IrqMutex::new(RingBuffer::new_with(empty)),
            readers: WaitQueue::new(),
        }
    }

    /// Non-blocking enqueue. Returns `false` if the queue is full.
    ///
    /// Safe to call from interrupt context: takes the lock with interrupts
    /// already disabled, never blocks.
    pub fn try_put(&self, value: T) -> bool {
        let pushed = self.buf.lock().try_push(value);
        if pushed {
            self.readers.wake_all();
        }
        pushed
    }

    /// Non-blocking dequeue. Returns `None` if the queue is empty.
    pub fn try_get(&self) -> Option<T> {
        self.buf.lock().try_pop()
    }

    /// Block the calling task until an item is available, then return it.
    /// Must only be called from task context.
    pub fn get(&self) -> T {
        loop {
            if let Some(v) = self.try_get() {
                return v;
            }
            self.readers.wait_event(|| !self.buf.lock().is_empty());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.lock().is_empty()
    }

    pub fn len(&self) -> u32 {
        self.buf.lock().len()
    }

    pub fn capacity(&self) -> u32 {
        N as u32
    }
}
