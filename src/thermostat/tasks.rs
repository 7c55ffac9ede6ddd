//! Thermostat sampling tasks.
//!
//! Fixed-period pollers. Each task owns its sensor port, pushes samples
//! through the [`Thermostat`] handle and sleeps — no flag waits, no
//! hardware writes. A failed read keeps the last-known-good value.

use std::time::Duration;

use log::warn;

use crate::mode::ControlSource;
use crate::ports::SensorPort;
use crate::thermostat::Thermostat;

// ── Climate sampler (temperature + humidity) ────────────────────

pub struct ClimateSampler<T: SensorPort, H: SensorPort> {
    thermostat: Thermostat,
    temperature: T,
    humidity: H,
    misses: u32,
}

impl<T: SensorPort, H: SensorPort> ClimateSampler<T, H> {
    pub fn new(thermostat: Thermostat, temperature: T, humidity: H) -> Self {
        Self {
            thermostat,
            temperature,
            humidity,
            misses: 0,
        }
    }

    pub fn run(mut self) -> ! {
        let period =
            Duration::from_millis(self.thermostat.config().sensor_read_interval_ms.into());
        loop {
            self.sample_once();
            std::thread::sleep(period);
        }
    }

    pub fn sample_once(&mut self) {
        match self.temperature.read() {
            Some(value) => {
                self.misses = 0;
                self.thermostat.record_temperature(value);
            }
            None => {
                self.misses += 1;
                warn!(
                    "climate-sampler: temperature read failed ({} in a row), keeping last value",
                    self.misses
                );
            }
        }
        if let Some(value) = self.humidity.read() {
            self.thermostat.record_humidity(value);
        }
    }
}

// ── Target knob sampler ─────────────────────────────────────────

/// Polls the setpoint knob. The port returns a value already mapped to
/// the target range; movements below the change threshold are treated
/// as pot noise and ignored.
pub struct KnobSampler<S: SensorPort> {
    thermostat: Thermostat,
    knob: S,
    last_sent: Option<f32>,
}

impl<S: SensorPort> KnobSampler<S> {
    pub fn new(thermostat: Thermostat, knob: S) -> Self {
        Self {
            thermostat,
            knob,
            last_sent: None,
        }
    }

    pub fn run(mut self) -> ! {
        let period =
            Duration::from_millis(self.thermostat.config().knob_read_interval_ms.into());
        loop {
            self.sample_once();
            std::thread::sleep(period);
        }
    }

    pub fn sample_once(&mut self) {
        let Some(value) = self.knob.read() else {
            return;
        };
        let threshold = self.thermostat.config().target_change_threshold_c;
        let moved = match self.last_sent {
            Some(prev) => (value - prev).abs() >= threshold,
            None => true,
        };
        if moved && self.thermostat.set_target(value, ControlSource::Local).applied() {
            self.last_sent = Some(value);
        }
    }
}
