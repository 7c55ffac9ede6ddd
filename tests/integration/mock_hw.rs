//! Mock hardware adapters for integration tests.
//!
//! Record every actuator and publish call so tests can assert on the
//! full command history without touching real GPIO/PWM registers. The
//! recorders are cloneable handles over shared history, so a test can
//! hand one clone to a control task and keep another for assertions.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use roomnode::config::{RoomConfig, ThermostatConfig};
use roomnode::error::Result;
use roomnode::ports::{FanPort, LightPort, PublishPort, SensorPort};
use roomnode::room::{LightId, Room};
use roomnode::sync::TelemetryQueue;
use roomnode::telemetry::{OutboundMessage, TELEMETRY_QUEUE_DEPTH};
use roomnode::thermostat::{FanSpeed, Thermostat};

pub type SharedQueue = Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>;

// ── Recording fan ─────────────────────────────────────────────

#[derive(Default, Clone)]
pub struct MockFan {
    calls: Rc<RefCell<Vec<FanSpeed>>>,
}

#[allow(dead_code)]
impl MockFan {
    pub fn history(&self) -> Vec<FanSpeed> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Option<FanSpeed> {
        self.calls.borrow().last().copied()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl FanPort for MockFan {
    fn set_speed(&mut self, speed: FanSpeed) {
        self.calls.borrow_mut().push(speed);
    }
}

// ── Recording lights ──────────────────────────────────────────

#[derive(Default, Clone)]
pub struct MockLights {
    calls: Rc<RefCell<Vec<(LightId, u8)>>>,
}

#[allow(dead_code)]
impl MockLights {
    pub fn history(&self) -> Vec<(LightId, u8)> {
        self.calls.borrow().clone()
    }

    /// Last level applied to a channel, if any call reached it.
    pub fn last_level(&self, id: LightId) -> Option<u8> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|&(i, level)| (i == id).then_some(level))
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl LightPort for MockLights {
    fn set_level(&mut self, id: LightId, level: u8) {
        self.calls.borrow_mut().push((id, level));
    }
}

// ── Recording publisher ───────────────────────────────────────

#[derive(Default, Clone)]
pub struct MockPublisher {
    published: Rc<RefCell<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl MockPublisher {
    pub fn history(&self) -> Vec<(String, String)> {
        self.published.borrow().clone()
    }
}

impl PublishPort for MockPublisher {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<()> {
        self.published.borrow_mut().push((
            topic.to_owned(),
            String::from_utf8(payload.to_vec()).unwrap(),
        ));
        Ok(())
    }
}

// ── Scripted sensor ───────────────────────────────────────────

/// Yields queued readings in order, then `None` forever.
pub struct ScriptedSensor {
    values: Vec<Option<f32>>,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(values: Vec<Option<f32>>) -> Self {
        Self { values }
    }
}

impl SensorPort for ScriptedSensor {
    fn read(&mut self) -> Option<f32> {
        if self.values.is_empty() {
            None
        } else {
            self.values.remove(0)
        }
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub fn thermostat_fixture() -> (Thermostat, SharedQueue) {
    let queue: SharedQueue = Arc::new(TelemetryQueue::new());
    (
        Thermostat::new(ThermostatConfig::default(), Arc::clone(&queue)),
        queue,
    )
}

pub fn room_fixture() -> (Room, SharedQueue) {
    let queue: SharedQueue = Arc::new(TelemetryQueue::new());
    (Room::new(RoomConfig::default(), Arc::clone(&queue)), queue)
}

/// Drain whatever the handle mutators raised so a test can assert on
/// the flags of the *next* action in isolation.
pub fn drain_flags(group: &roomnode::sync::FlagGroup, mask: u32) -> u32 {
    group
        .wait_any_timeout(mask, std::time::Duration::ZERO)
        .unwrap_or(0)
}
