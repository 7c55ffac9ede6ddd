//! Thermostat control task — the sole writer of fan hardware.
//!
//! Wakes on any flag, re-reads the store, resolves the desired output
//! under the current mode and applies it through the [`FanPort`]. Flags
//! are consumed in one batch; behavior depends only on the resolved
//! state, so coalesced wake-ups are harmless.

use log::{debug, info};

use crate::mode::Mode;
use crate::ports::FanPort;
use crate::telemetry::OutboundMessage;
use crate::thermostat::{fan_level, flags, FanSpeed, Thermostat};

pub struct ControlTask<F: FanPort> {
    thermostat: Thermostat,
    fan: F,
    /// Last speed actually written to hardware. `None` until the first
    /// apply, so the boot-time all-off settle always reaches the port.
    applied: Option<FanSpeed>,
}

impl<F: FanPort> ControlTask<F> {
    pub fn new(thermostat: Thermostat, fan: F) -> Self {
        Self {
            thermostat,
            fan,
            applied: None,
        }
    }

    /// Block on the flag group and process wake-ups forever.
    pub fn run(mut self) -> ! {
        // Settle the actuator into the OFF-mode resting state before the
        // first flag arrives.
        self.step(0);
        loop {
            let observed = self.thermostat.flags().wait_any(flags::ALL);
            self.step(observed);
        }
    }

    /// One control cycle: resolve the desired fan speed from the current
    /// state and push it to hardware if it differs from what is running.
    ///
    /// Processing order is fixed (reading, target, network target, mode,
    /// manual output) and logged per flag; the resolved output depends
    /// only on the final state.
    pub fn step(&mut self, observed: u32) {
        if observed & flags::READING_UPDATED != 0 {
            debug!("thermostat-control: reading updated");
        }
        if observed & flags::TARGET_UPDATED != 0 {
            debug!("thermostat-control: target updated (local)");
        }
        if observed & flags::TARGET_FROM_NETWORK != 0 {
            debug!("thermostat-control: target updated (network)");
        }
        if observed & flags::MODE_UPDATED != 0 {
            debug!("thermostat-control: mode updated");
        }
        if observed & flags::MANUAL_OUTPUT_UPDATED != 0 {
            debug!("thermostat-control: manual fan command");
        }

        let snap = self.thermostat.snapshot();
        let desired = match snap.mode {
            Mode::Off => FanSpeed::Off,
            // MANUAL replays whatever the last accepted command stored.
            Mode::Manual => snap.fan_speed,
            Mode::Auto => match snap.temperature {
                Some(current) => {
                    let level = fan_level(self.thermostat.config(), snap.target_temp, current);
                    if level != snap.fan_speed {
                        self.thermostat.store_fan(level);
                    }
                    level
                }
                None => {
                    // No valid reading yet: automatic actuation suspended.
                    debug!("thermostat-control: AUTO idle, no reading yet");
                    return;
                }
            },
        };

        if self.applied != Some(desired) {
            self.fan.set_speed(desired);
            self.applied = Some(desired);
            info!("thermostat-control: fan -> {desired}");
            self.thermostat
                .announce(OutboundMessage::FanSpeed(desired));
        }
    }
}
