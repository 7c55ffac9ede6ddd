//! RoomNode firmware library.
//!
//! Exposes the control core for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod config;
pub mod error;
pub mod mode;
pub mod net;
pub mod payload;
pub mod ports;
pub mod room;
pub mod sync;
pub mod telemetry;
pub mod thermostat;

pub mod pins;

// Hardware adapters; the register-level implementations are guarded by
// cfg attributes inside.
pub mod drivers;
