//! Hardware adapters implementing the port traits.
//!
//! `hw` holds the raw peripheral init and register-level accessors; the
//! sibling modules wrap them in the [`crate::ports`] traits. Host
//! builds get inert stubs so everything above this layer is testable
//! off-target.

pub mod adc;
pub mod button;
pub mod fan;
pub mod hw;
pub mod lights;
