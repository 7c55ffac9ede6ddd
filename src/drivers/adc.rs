//! Analog sensor adapters over the oneshot ADC.
//!
//! Each adapter owns one ADC1 channel and maps the raw 12-bit count to
//! engineering units before it ever reaches a sampling task.

use crate::drivers::hw;
use crate::ports::SensorPort;

/// Full-scale raw count for the 12-bit oneshot reads.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Linear map from a raw count to `[min, max]`.
pub fn map_raw(raw: u16, min: f32, max: f32) -> f32 {
    let raw = raw.min(ADC_FULL_SCALE);
    min + (f32::from(raw) / f32::from(ADC_FULL_SCALE)) * (max - min)
}

/// Potentiometer standing in for an analog sensor (bench rig) or acting
/// as the setpoint knob. Reads map linearly onto `[min, max]`.
pub struct PotSensor {
    channel: u32,
    min: f32,
    max: f32,
}

impl PotSensor {
    pub fn new(channel: u32, min: f32, max: f32) -> Self {
        Self { channel, min, max }
    }
}

impl SensorPort for PotSensor {
    fn read(&mut self) -> Option<f32> {
        hw::adc1_read(self.channel).map(|raw| map_raw(raw, self.min, self.max))
    }
}

/// Light-dependent resistor on a divider wired so more light means a
/// higher count. Reports ambient light in percent.
pub struct LdrSensor {
    channel: u32,
}

impl LdrSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl SensorPort for LdrSensor {
    fn read(&mut self) -> Option<f32> {
        hw::adc1_read(self.channel).map(|raw| map_raw(raw, 0.0, 100.0))
    }
}
