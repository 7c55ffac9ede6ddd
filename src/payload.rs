//! Command payload parsing.
//!
//! Inbound MQTT payloads are small ASCII tokens. Parsing is strict on
//! vocabulary but tolerant on spelling: case-insensitive, surrounding
//! whitespace trimmed, and the numeric aliases the previous generation
//! of dashboards sent ("0"/"1"/"2" for modes) are still accepted.
//! Anything else is a rejection — never a default.

use crate::mode::Mode;
use crate::thermostat::FanSpeed;

/// Parse a decimal number, e.g. a target temperature. NaN and
/// infinities are rejected here so range checks downstream stay simple.
pub fn parse_f32(payload: &str) -> Option<f32> {
    let v: f32 = payload.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

/// Parse an on/off token.
pub fn parse_bool(payload: &str) -> Option<bool> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a thermostat operating mode. Numeric aliases follow that
/// subsystem's legacy wire encoding (0 = OFF, 1 = AUTO, 2 = MANUAL).
pub fn parse_thermostat_mode(payload: &str) -> Option<Mode> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "off" | "0" => Some(Mode::Off),
        "auto" | "automatic" | "1" => Some(Mode::Auto),
        "manual" | "man" | "2" => Some(Mode::Manual),
        _ => None,
    }
}

/// Parse a room operating mode. The room's legacy numeric encoding
/// disagrees with the thermostat's (0 = OFF, 1 = MANUAL, 2 = AUTO),
/// so each subsystem keeps its own table.
pub fn parse_room_mode(payload: &str) -> Option<Mode> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "off" | "0" => Some(Mode::Off),
        "manual" | "man" | "1" => Some(Mode::Manual),
        "auto" | "automatic" | "2" => Some(Mode::Auto),
        _ => None,
    }
}

/// Parse a fan speed command.
pub fn parse_fan(payload: &str) -> Option<FanSpeed> {
    match payload.trim().to_ascii_lowercase().as_str() {
        "off" | "0" => Some(FanSpeed::Off),
        "low" | "1" => Some(FanSpeed::Low),
        "medium" | "med" | "2" => Some(FanSpeed::Medium),
        "high" | "3" => Some(FanSpeed::High),
        _ => None,
    }
}
