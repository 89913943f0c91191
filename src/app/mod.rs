//! Application core — the device loop and the ports it talks through.
//!
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real pins.

pub mod events;
pub mod ports;
pub mod service;
