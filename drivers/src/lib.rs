#![no_std]
#![allow(unsafe_op_in_unsafe_fn)]

pub mod pic;
pub mod serial;
