//! Thermostat command ingress.
//!
//! Maps validated `(topic, payload)` pairs onto [`Thermostat`] mutators.
//! Every write goes through the same validation and gating as local
//! input; a malformed payload is logged and changes nothing.

use log::{info, warn};

use crate::mode::ControlSource;
use crate::net::topics;
use crate::payload;
use crate::thermostat::Thermostat;

/// Handle one inbound message. Returns `false` when the topic does not
/// belong to the thermostat so the dispatcher can try other subsystems.
pub fn handle(thermostat: &Thermostat, topic: &str, body: &str) -> bool {
    match topic {
        topics::THERMOSTAT_TARGET_SET => {
            match payload::parse_f32(body) {
                Some(value) => {
                    let outcome = thermostat.set_target(value, ControlSource::Network);
                    info!("ingress: target/set {value:.1} -> {outcome:?}");
                }
                None => warn!("ingress: unparseable target payload {body:?}"),
            }
            true
        }
        topics::THERMOSTAT_MODE_SET => {
            match payload::parse_thermostat_mode(body) {
                Some(mode) => {
                    let outcome = thermostat.set_mode(mode);
                    info!("ingress: thermostat mode/set {mode} -> {outcome:?}");
                }
                None => warn!("ingress: unknown thermostat mode {body:?}"),
            }
            true
        }
        topics::THERMOSTAT_FAN_SET => {
            match payload::parse_fan(body) {
                Some(speed) => {
                    let outcome = thermostat.set_fan(speed, ControlSource::Network);
                    info!("ingress: fan/set {speed} -> {outcome:?}");
                }
                None => warn!("ingress: unknown fan speed {body:?}"),
            }
            true
        }
        _ => false,
    }
}
