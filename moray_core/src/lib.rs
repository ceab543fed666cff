extern crate anymap;
extern crate chrono;

#[macro_use]
pub mod core;

pub mod trace;
