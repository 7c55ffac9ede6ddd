//! Fan output driver.
//!
//! The bench rig indicates fan speed with three GPIO LEDs, one per
//! level; exactly one is lit while the fan runs, none when it is off.

use crate::drivers::hw;
use crate::pins;
use crate::ports::FanPort;
use crate::thermostat::FanSpeed;

pub struct FanDriver;

impl FanDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FanDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FanPort for FanDriver {
    fn set_speed(&mut self, speed: FanSpeed) {
        hw::gpio_write(pins::FAN_LOW_GPIO, speed == FanSpeed::Low);
        hw::gpio_write(pins::FAN_MED_GPIO, speed == FanSpeed::Medium);
        hw::gpio_write(pins::FAN_HIGH_GPIO, speed == FanSpeed::High);
    }
}
