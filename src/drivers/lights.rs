//! Room light driver over the LEDC PWM channels.

use crate::drivers::hw;
use crate::pins;
use crate::ports::LightPort;
use crate::room::LightId;

pub struct LightDriver;

impl LightDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LightDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LightPort for LightDriver {
    fn set_level(&mut self, id: LightId, level: u8) {
        let channel = match id {
            LightId::Led1 => pins::LEDC_CH_LED1,
            LightId::Led2 => pins::LEDC_CH_LED2,
        };
        hw::ledc_set(channel, level);
    }
}
