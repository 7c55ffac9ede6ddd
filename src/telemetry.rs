//! Outbound status messages.
//!
//! Every state change worth announcing is captured as a typed
//! [`OutboundMessage`] and enqueued on the shared telemetry queue. The
//! network egress task renders each message to its topic and payload at
//! publish time, so producers never format strings or touch the network.
//!
//! Delivery is at-most-once: a full queue or a dead link drops the
//! message, and the next periodic sample supersedes it anyway.

use core::fmt::Write as _;

use crate::mode::Mode;
use crate::net::topics;
use crate::room::LightId;
use crate::thermostat::FanSpeed;

/// Depth of the shared outbound queue. Sized for a worst-case burst of
/// one message per producer plus mode/status echoes.
pub const TELEMETRY_QUEUE_DEPTH: usize = 8;

/// Largest rendered payload ("MEDIUM" and one-decimal floats both fit).
pub type Payload = heapless::String<16>;

/// A single publishable status update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutboundMessage {
    Temperature(f32),
    Humidity(f32),
    TargetTemp(f32),
    ThermostatMode(Mode),
    FanSpeed(FanSpeed),
    LightPercent(u8),
    RoomMode(Mode),
    LightState { id: LightId, on: bool },
}

impl OutboundMessage {
    /// Status topic this message publishes to.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Temperature(_) => topics::THERMOSTAT_TEMP,
            Self::Humidity(_) => topics::THERMOSTAT_HUMIDITY,
            Self::TargetTemp(_) => topics::THERMOSTAT_TARGET,
            Self::ThermostatMode(_) => topics::THERMOSTAT_MODE,
            Self::FanSpeed(_) => topics::THERMOSTAT_FAN,
            Self::LightPercent(_) => topics::ROOM_LIGHT,
            Self::RoomMode(_) => topics::ROOM_MODE,
            Self::LightState { id: LightId::Led1, .. } => topics::ROOM_LED1,
            Self::LightState { id: LightId::Led2, .. } => topics::ROOM_LED2,
        }
    }

    /// Render the wire payload. Floats carry one decimal place, matching
    /// what dashboards subscribed to these topics expect.
    pub fn render(&self) -> Payload {
        let mut out = Payload::new();
        // A 16-byte buffer always fits the formats below.
        let _ = match self {
            Self::Temperature(v) | Self::Humidity(v) | Self::TargetTemp(v) => {
                write!(out, "{v:.1}")
            }
            Self::ThermostatMode(m) | Self::RoomMode(m) => out.push_str(m.as_str()).map_err(|_| core::fmt::Error),
            Self::FanSpeed(s) => out.push_str(s.as_str()).map_err(|_| core::fmt::Error),
            Self::LightPercent(p) => write!(out, "{p}"),
            Self::LightState { on, .. } => out
                .push_str(if *on { "ON" } else { "OFF" })
                .map_err(|_| core::fmt::Error),
        };
        out
    }

    /// Short tag for drop logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Temperature(_) => "temperature",
            Self::Humidity(_) => "humidity",
            Self::TargetTemp(_) => "target",
            Self::ThermostatMode(_) => "thermostat-mode",
            Self::FanSpeed(_) => "fan-speed",
            Self::LightPercent(_) => "light-percent",
            Self::RoomMode(_) => "room-mode",
            Self::LightState { .. } => "light-state",
        }
    }
}
