#![deny(clippy::all, unsafe_op_in_unsafe_fn)]
#![warn(rust_2018_idioms)]

pub mod constants;
pub mod controller;
pub mod platform;
pub mod store;
