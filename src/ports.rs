//! Port traits — the hexagonal boundary between control logic and the outside world.
//!
//! ```text
//!   hardware adapter ──▶ Port trait ──▶ control task (domain)
//! ```
//!
//! Driven adapters (ADC readers, PWM lights, the fan driver, the MQTT
//! client) implement these traits. Control and egress tasks consume them
//! via generics, so the domain core never touches hardware directly —
//! tests substitute recording mocks.

use crate::error::Result;
use crate::room::LightId;
use crate::thermostat::FanSpeed;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for a single analog signal (temperature, knob, LDR).
///
/// `None` means the reading failed or is not plausible; the sampling
/// task retains the last-known-good value and logs the miss.
pub trait SensorPort {
    fn read(&mut self) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Fan actuator. The thermostat control task is the only caller.
pub trait FanPort {
    fn set_speed(&mut self, speed: FanSpeed);
}

/// Room light actuator. The room control task is the only caller.
pub trait LightPort {
    /// Apply a PWM level (0 = off, 255 = full) to one channel.
    fn set_level(&mut self, id: LightId, level: u8);
}

/// Momentary push button, active while held.
pub trait ButtonPort {
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Publish port (driven adapter: domain → network)
// ───────────────────────────────────────────────────────────────

/// Outbound telemetry publisher. The egress task is the only caller.
pub trait PublishPort {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<()>;
}
