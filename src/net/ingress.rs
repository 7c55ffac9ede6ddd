//! Inbound command dispatcher.
//!
//! Sits between the MQTT receive loop and the subsystem ingress
//! handlers. Everything here is defensive: size-capped, UTF-8 checked,
//! and unknown topics are dropped without side effects.

use log::{debug, warn};

use crate::room::Room;
use crate::thermostat::Thermostat;
use crate::{room, thermostat};

/// Commands are short tokens; anything bigger is noise or abuse.
const MAX_PAYLOAD_BYTES: usize = 64;

/// Route one inbound message to the owning subsystem.
pub fn dispatch(thermostat: &Thermostat, room: &Room, topic: &str, data: &[u8]) {
    if data.len() > MAX_PAYLOAD_BYTES {
        warn!(
            "ingress: oversized payload on {topic} ({} bytes), dropped",
            data.len()
        );
        return;
    }
    let Ok(body) = core::str::from_utf8(data) else {
        warn!("ingress: non-UTF-8 payload on {topic}, dropped");
        return;
    };
    if thermostat::ingress::handle(thermostat, topic, body) {
        return;
    }
    if room::ingress::handle(room, topic, body) {
        return;
    }
    debug!("ingress: no handler for topic {topic}");
}
