//! Room control task — the sole writer of light hardware.
//!
//! Same cycle as the thermostat's: wake on flags, re-read the store,
//! resolve one PWM level per channel under the current mode, apply
//! changed levels through the [`LightPort`].

use log::{debug, info};

use crate::mode::Mode;
use crate::ports::LightPort;
use crate::room::{brightness_for, flags, LightId, Room};
use crate::telemetry::OutboundMessage;

pub struct ControlTask<L: LightPort> {
    room: Room,
    lights: L,
    /// Levels actually written to hardware, per channel. `None` until
    /// the first apply so the boot settle always reaches the port.
    applied: [Option<u8>; 2],
}

impl<L: LightPort> ControlTask<L> {
    pub fn new(room: Room, lights: L) -> Self {
        Self {
            room,
            lights,
            applied: [None; 2],
        }
    }

    /// Block on the flag group and process wake-ups forever.
    pub fn run(mut self) -> ! {
        self.step(0);
        loop {
            let observed = self.room.flags().wait_any(flags::ALL);
            self.step(observed);
        }
    }

    /// One control cycle.
    pub fn step(&mut self, observed: u32) {
        if observed & flags::READING_UPDATED != 0 {
            debug!("room-control: ambient light updated");
        }
        if observed & flags::MODE_UPDATED != 0 {
            debug!("room-control: mode updated");
        }
        if observed & flags::MANUAL_OUTPUT_UPDATED != 0 {
            debug!("room-control: manual light command");
        }

        let snap = self.room.snapshot();
        let levels: [u8; 2] = match snap.mode {
            Mode::Off => [0, 0],
            Mode::Manual => {
                let level = |i: usize| {
                    let ch = snap.lights[i];
                    if ch.on { ch.brightness } else { 0 }
                };
                [level(0), level(1)]
            }
            Mode::Auto => match snap.light_percent {
                Some(percent) => {
                    let level = brightness_for(self.room.config(), percent);
                    if snap.lights.iter().any(|ch| !ch.on || ch.brightness != level) {
                        self.room.store_auto_brightness(level);
                    }
                    [level, level]
                }
                None => {
                    // No ambient reading yet: automatic dimming suspended.
                    debug!("room-control: AUTO idle, no reading yet");
                    return;
                }
            },
        };

        for id in LightId::ALL {
            let i = id.index();
            if self.applied[i] == Some(levels[i]) {
                continue;
            }
            let was_on = self.applied[i].is_some_and(|l| l > 0);
            self.lights.set_level(id, levels[i]);
            let on = levels[i] > 0;
            info!("room-control: led{} -> {}", i + 1, levels[i]);
            if self.applied[i].is_none() || was_on != on {
                self.room.announce(OutboundMessage::LightState { id, on });
            }
            self.applied[i] = Some(levels[i]);
        }
    }
}
