//! Rig controller and stock ledger library.
//!
//! Exposes the pure-logic modules for integration testing and for the two
//! binaries.  Real Raspberry Pi GPIO is behind the `rpi` feature; without
//! it the device loop runs against the simulated GPIO adapter.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod ledger;
pub mod pins;
pub mod sensors;
