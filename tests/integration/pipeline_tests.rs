//! Full path: inbound MQTT command → store → control step → egress.
//!
//! Both subsystems share one telemetry queue, as they do on the device.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use roomnode::config::{RoomConfig, ThermostatConfig};
use roomnode::mode::{ControlSource, Mode};
use roomnode::net::egress::EgressTask;
use roomnode::net::ingress::dispatch;
use roomnode::room::{self, Room};
use roomnode::sync::TelemetryQueue;
use roomnode::telemetry::OutboundMessage;
use roomnode::thermostat::tasks::ClimateSampler;
use roomnode::thermostat::{self, Thermostat};

use crate::mock_hw::{drain_flags, MockFan, MockLights, MockPublisher, ScriptedSensor, SharedQueue};

fn node() -> (Thermostat, Room, SharedQueue) {
    let queue: SharedQueue = Arc::new(TelemetryQueue::new());
    (
        Thermostat::new(ThermostatConfig::default(), Arc::clone(&queue)),
        Room::new(RoomConfig::default(), Arc::clone(&queue)),
        queue,
    )
}

fn pump_all(queue: &SharedQueue, publisher: MockPublisher) -> EgressTask<MockPublisher> {
    let mut egress = EgressTask::new(
        Arc::clone(queue),
        publisher,
        Arc::new(AtomicBool::new(true)),
        Duration::from_millis(1),
    );
    while egress.pump_once() {}
    egress
}

#[test]
fn thermostat_command_round_trip() {
    let (t, _r, queue) = node();
    let fan = MockFan::default();
    let publisher = MockPublisher::default();

    t.record_temperature(22.0);
    dispatch(&t, &_r, "home/thermostat/target/set", b"26.0");
    dispatch(&t, &_r, "home/thermostat/mode/set", b"auto");

    let mut ctl = thermostat::control::ControlTask::new(t.clone(), fan.clone());
    ctl.step(drain_flags(t.flags(), thermostat::flags::ALL));
    assert_eq!(fan.last(), Some(thermostat::FanSpeed::High));

    let _ = pump_all(&queue, publisher.clone());
    assert_eq!(
        publisher.history(),
        vec![
            ("home/thermostat/temp".to_owned(), "22.0".to_owned()),
            ("home/thermostat/target".to_owned(), "26.0".to_owned()),
            ("home/thermostat/mode".to_owned(), "AUTO".to_owned()),
            ("home/thermostat/fan".to_owned(), "HIGH".to_owned()),
        ]
    );
}

#[test]
fn room_command_round_trip() {
    let (t, r, queue) = node();
    let lights = MockLights::default();
    let publisher = MockPublisher::default();

    dispatch(&t, &r, "home/room/mode/set", b"manual");
    dispatch(&t, &r, "home/room/led1/set", b"on");

    let mut ctl = room::control::ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), room::flags::ALL));
    assert_eq!(lights.last_level(room::LightId::Led1), Some(255));
    assert_eq!(lights.last_level(room::LightId::Led2), Some(0));

    let _ = pump_all(&queue, publisher.clone());
    // First apply announces both channel states.
    assert_eq!(
        publisher.history(),
        vec![
            ("home/room/mode".to_owned(), "MANUAL".to_owned()),
            ("home/room/led1".to_owned(), "ON".to_owned()),
            ("home/room/led2".to_owned(), "OFF".to_owned()),
        ]
    );
}

#[test]
fn sampler_feeds_the_control_loop() {
    let (t, _r, _queue) = node();
    let fan = MockFan::default();
    let mut sampler = ClimateSampler::new(
        t.clone(),
        ScriptedSensor::new(vec![Some(21.0)]),
        ScriptedSensor::new(vec![Some(40.0)]),
    );
    let _ = t.set_target(25.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Auto);
    let mut ctl = thermostat::control::ControlTask::new(t.clone(), fan.clone());

    sampler.sample_once();
    ctl.step(drain_flags(t.flags(), thermostat::flags::ALL));
    // 4 °C short of target lands in the top band.
    assert_eq!(fan.last(), Some(thermostat::FanSpeed::High));
    assert_eq!(t.snapshot().humidity, Some(40.0));
}

#[test]
fn queue_burst_drops_telemetry_but_never_state() {
    let (t, _r, queue) = node();
    for i in 0..8u8 {
        queue.try_enqueue(OutboundMessage::LightPercent(i)).unwrap();
    }
    assert!(queue.try_enqueue(OutboundMessage::LightPercent(99)).is_err());

    // A store write whose status message cannot be queued still lands.
    t.record_temperature(21.0);
    assert_eq!(t.snapshot().temperature, Some(21.0));
    assert_eq!(queue.len(), 8);
}

#[test]
fn boot_mode_announcements_reach_the_broker() {
    let (t, r, queue) = node();
    let publisher = MockPublisher::default();
    // Boot enqueues the initial mode status before any broker event has
    // been seen; the link is advisory-up from client creation.
    queue
        .try_enqueue(OutboundMessage::ThermostatMode(t.snapshot().mode))
        .unwrap();
    queue
        .try_enqueue(OutboundMessage::RoomMode(r.snapshot().mode))
        .unwrap();
    let _ = pump_all(&queue, publisher.clone());
    assert_eq!(
        publisher.history(),
        vec![
            ("home/thermostat/mode".to_owned(), "OFF".to_owned()),
            ("home/room/mode".to_owned(), "OFF".to_owned()),
        ]
    );
}

#[test]
fn offline_egress_drains_without_publishing() {
    let (t, _r, queue) = node();
    let publisher = MockPublisher::default();
    t.record_temperature(19.5);

    let mut egress = EgressTask::new(
        Arc::clone(&queue),
        publisher.clone(),
        Arc::new(AtomicBool::new(false)),
        Duration::from_millis(1),
    );
    assert!(egress.pump_once());
    assert!(publisher.history().is_empty());
    assert!(queue.is_empty());
}
