//! Room sampling tasks: the LDR poller and the button scanner.

use std::time::{Duration, Instant};

use log::warn;

use crate::mode::ControlSource;
use crate::ports::{ButtonPort, SensorPort};
use crate::room::{LightId, Room};

/// Button scan period. Well under the debounce interval so a press is
/// never missed, well over ISR territory.
const BUTTON_SCAN_PERIOD: Duration = Duration::from_millis(20);

// ── Ambient light sampler ───────────────────────────────────────

/// Polls the LDR. The port returns the ambient level already mapped to
/// percent (0 = dark, 100 = bright).
pub struct LightSampler<S: SensorPort> {
    room: Room,
    ldr: S,
    misses: u32,
}

impl<S: SensorPort> LightSampler<S> {
    pub fn new(room: Room, ldr: S) -> Self {
        Self { room, ldr, misses: 0 }
    }

    pub fn run(mut self) -> ! {
        let period = Duration::from_millis(self.room.config().sensor_read_interval_ms.into());
        loop {
            self.sample_once();
            std::thread::sleep(period);
        }
    }

    pub fn sample_once(&mut self) {
        match self.ldr.read() {
            Some(value) if (0.0..=100.0).contains(&value) => {
                self.misses = 0;
                self.room.record_light(value as u8);
            }
            Some(value) => {
                warn!("light-sampler: implausible ambient reading {value}, ignored");
            }
            None => {
                self.misses += 1;
                warn!(
                    "light-sampler: LDR read failed ({} in a row), keeping last value",
                    self.misses
                );
            }
        }
    }
}

// ── Button scanner ──────────────────────────────────────────────

/// Scans both push buttons and toggles the paired channel on a press.
/// A held button retriggers at most once per debounce interval,
/// matching the level-triggered behavior users expect from the panel.
pub struct ButtonScanner<B1: ButtonPort, B2: ButtonPort> {
    room: Room,
    button1: B1,
    button2: B2,
    last_fire: [Option<Instant>; 2],
}

impl<B1: ButtonPort, B2: ButtonPort> ButtonScanner<B1, B2> {
    pub fn new(room: Room, button1: B1, button2: B2) -> Self {
        Self {
            room,
            button1,
            button2,
            last_fire: [None; 2],
        }
    }

    pub fn run(mut self) -> ! {
        loop {
            self.scan_once();
            std::thread::sleep(BUTTON_SCAN_PERIOD);
        }
    }

    pub fn scan_once(&mut self) {
        let debounce = Duration::from_millis(self.room.config().button_debounce_ms.into());
        let now = Instant::now();
        let pressed = [self.button1.is_pressed(), self.button2.is_pressed()];
        for (id, pressed) in LightId::ALL.into_iter().zip(pressed) {
            if !pressed {
                continue;
            }
            let i = id.index();
            let settled = self.last_fire[i].is_none_or(|t| now.duration_since(t) >= debounce);
            if settled {
                self.last_fire[i] = Some(now);
                // Gated inside the handle: toggles only land in MANUAL.
                let _ = self.room.toggle_light(id, ControlSource::Local);
            }
        }
    }
}
