//! Deferred-function scheduler core: CMOS RTC-driven timers, split into an
//! interrupt-context top half and a task-context bottom half.
//!
//! See [`api`] for the public entry points, [`init`] for bring-up, and
//! [`handler`]/[`worker`] for the two halves of the scheduler itself.

#![no_std]

pub mod api;
pub mod cmos;
pub mod config;
pub mod error;
pub mod handler;
pub mod id_alloc;
pub mod init;
pub mod irq;
pub mod pool;
pub mod timer_list;
pub mod worker;

#[cfg(feature = "itests")]
mod api_tests;
#[cfg(feature = "itests")]
mod cmos_tests;
#[cfg(feature = "itests")]
mod id_alloc_tests;
#[cfg(feature = "itests")]
mod timer_list_tests;
#[cfg(feature = "itests")]
pub mod selftest;

pub use error::RtcError;
pub use timer_list::{Mode, TimerCallback};
