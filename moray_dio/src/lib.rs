extern crate moray_core;
extern crate serde;
extern crate strum;
extern crate strum_macros;

pub mod messages;
pub mod alarm;
pub mod error;
pub mod link;
pub mod register;
pub mod reader;
pub mod writer;
pub mod registry;
pub mod devices;
pub mod settings;
pub mod setup;
