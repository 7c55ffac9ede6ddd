//! Room command ingress.

use log::{info, warn};

use crate::mode::ControlSource;
use crate::net::topics;
use crate::payload;
use crate::room::{LightId, Room};

/// Handle one inbound message. Returns `false` when the topic does not
/// belong to the room subsystem.
pub fn handle(room: &Room, topic: &str, body: &str) -> bool {
    match topic {
        topics::ROOM_MODE_SET => {
            match payload::parse_room_mode(body) {
                Some(mode) => {
                    let outcome = room.set_mode(mode);
                    info!("ingress: room mode/set {mode} -> {outcome:?}");
                }
                None => warn!("ingress: unknown room mode {body:?}"),
            }
            true
        }
        topics::ROOM_LED1_SET => {
            switch(room, LightId::Led1, body);
            true
        }
        topics::ROOM_LED2_SET => {
            switch(room, LightId::Led2, body);
            true
        }
        _ => false,
    }
}

fn switch(room: &Room, id: LightId, body: &str) {
    match payload::parse_bool(body) {
        Some(on) => {
            let outcome = room.set_light(id, on, ControlSource::Network);
            info!("ingress: led{}/set {on} -> {outcome:?}", id.index() + 1);
        }
        None => warn!("ingress: unknown light command {body:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::mode::Mode;
    use crate::sync::TelemetryQueue;
    use std::sync::Arc;

    fn handle_under_test() -> Room {
        Room::new(RoomConfig::default(), Arc::new(TelemetryQueue::new()))
    }

    #[test]
    fn led_commands_respect_the_gate() {
        let r = handle_under_test();
        assert!(handle(&r, topics::ROOM_LED1_SET, "ON"));
        assert!(!r.snapshot().lights[0].on, "OFF mode refuses the write");
        assert!(handle(&r, topics::ROOM_MODE_SET, "MANUAL"));
        assert!(handle(&r, topics::ROOM_LED1_SET, "ON"));
        assert!(r.snapshot().lights[0].on);
        assert!(!r.snapshot().lights[1].on);
    }

    #[test]
    fn malformed_payload_changes_nothing() {
        let r = handle_under_test();
        let _ = r.set_mode(Mode::Manual);
        let before = r.snapshot();
        assert!(handle(&r, topics::ROOM_LED2_SET, "blue"));
        assert!(handle(&r, topics::ROOM_MODE_SET, "party"));
        assert_eq!(r.snapshot(), before);
    }

    #[test]
    fn foreign_topic_is_passed_over() {
        let r = handle_under_test();
        assert!(!handle(&r, "home/thermostat/fan/set", "HIGH"));
    }
}
