//! Shared concurrency primitives for the control core.
//!
//! Three building blocks, instantiated once per controlled subsystem
//! (thermostat, room lighting) plus one shared telemetry queue:
//!
//! ```text
//! ┌───────────────┐ write  ┌──────────────┐ raise  ┌─────────────┐
//! │ Sampling task │───────▶│  StateStore   │───────▶│  FlagGroup  │
//! │ Ingress task  │        │ (Arc<Mutex>)  │        │ (Condvar)   │
//! └───────────────┘        └──────────────┘        └──────┬──────┘
//!                                                  wait_any│
//!                          ┌──────────────┐               ▼
//!                          │TelemetryQueue │◀──── Control task
//!                          │ (bounded FIFO)│
//!                          └──────────────┘
//! ```
//!
//! The store mutex is the only serialization point for state; the flag
//! group and queue carry no payload state of their own.

pub mod flags;
pub mod queue;
pub mod store;

pub use flags::FlagGroup;
pub use queue::TelemetryQueue;
pub use store::{StateStore, WriteOutcome};
