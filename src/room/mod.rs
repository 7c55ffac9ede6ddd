//! Room lighting subsystem: ambient-light-driven LED dimming.
//!
//! Same shape as the thermostat: samplers and ingress write through the
//! [`Room`] handle, the control task owns the [`LightPort`] hardware.
//! Two PWM channels share one brightness in AUTO; in MANUAL each channel
//! is switched independently at full brightness.

pub mod control;
pub mod ingress;
pub mod tasks;

use std::sync::Arc;

use log::warn;

use crate::config::RoomConfig;
use crate::mode::{write_allowed, ControlSource, Mode};
use crate::sync::{FlagGroup, StateStore, TelemetryQueue, WriteOutcome};
use crate::telemetry::{OutboundMessage, TELEMETRY_QUEUE_DEPTH};

// ── Event flags ─────────────────────────────────────────────────

pub mod flags {
    pub const READING_UPDATED: u32 = 1 << 0;
    pub const MODE_UPDATED: u32 = 1 << 1;
    pub const MANUAL_OUTPUT_UPDATED: u32 = 1 << 2;

    pub const ALL: u32 = READING_UPDATED | MODE_UPDATED | MANUAL_OUTPUT_UPDATED;
}

// ── Types ───────────────────────────────────────────────────────

/// The two PWM light channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightId {
    Led1,
    Led2,
}

impl LightId {
    pub const ALL: [Self; 2] = [Self::Led1, Self::Led2];

    pub fn index(self) -> usize {
        match self {
            Self::Led1 => 0,
            Self::Led2 => 1,
        }
    }
}

/// One light channel's commanded state. `brightness` is the PWM level
/// applied while the channel is on; an off channel always drives 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightChannel {
    pub on: bool,
    pub brightness: u8,
}

/// The room's single mutable state record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomState {
    /// Ambient light, 0 (dark) to 100 (bright). `None` until the LDR
    /// produces its first valid sample.
    pub light_percent: Option<u8>,
    pub lights: [LightChannel; 2],
    pub mode: Mode,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            light_percent: None,
            lights: [LightChannel { on: false, brightness: 255 }; 2],
            mode: Mode::Off,
        }
    }
}

// ── Automatic algorithm ─────────────────────────────────────────

/// Pure mapping from ambient light to PWM brightness: full in the dark,
/// minimum in bright light, linear in between. Monotone non-increasing.
pub fn brightness_for(cfg: &RoomConfig, light_percent: u8) -> u8 {
    let (lo, hi) = (cfg.dark_threshold_percent, cfg.bright_threshold_percent);
    if light_percent < lo {
        cfg.brightness_max
    } else if light_percent > hi {
        cfg.brightness_min
    } else {
        let span = i32::from(hi - lo);
        let drop = i32::from(cfg.brightness_max) - i32::from(cfg.brightness_min);
        let offset = i32::from(light_percent - lo);
        (i32::from(cfg.brightness_max) - offset * drop / span) as u8
    }
}

// ── Subsystem handle ────────────────────────────────────────────

/// Shared handle bundling the room's store, flag group and the outbound
/// queue. Cheap to clone; one clone per task.
#[derive(Clone)]
pub struct Room {
    store: StateStore<RoomState>,
    flags: Arc<FlagGroup>,
    telemetry: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
    cfg: RoomConfig,
}

impl Room {
    pub fn new(
        cfg: RoomConfig,
        telemetry: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
    ) -> Self {
        Self {
            store: StateStore::new(RoomState::default()),
            flags: Arc::new(FlagGroup::new()),
            telemetry,
            cfg,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.cfg
    }

    pub fn flags(&self) -> &FlagGroup {
        &self.flags
    }

    pub fn snapshot(&self) -> RoomState {
        self.store.snapshot()
    }

    /// Store a fresh ambient-light sample. Deltas below the change
    /// threshold are sensor noise and ignored entirely; the stored value
    /// only moves on an accepted sample, so slow drift still accumulates
    /// against the last accepted reference and eventually acts.
    pub fn record_light(&self, percent: u8) {
        let percent = percent.min(100);
        let acted = self.store.write(|s| {
            let acted = match s.light_percent {
                Some(prev) => {
                    prev.abs_diff(percent) >= self.cfg.light_change_threshold_percent
                }
                None => true,
            };
            if acted {
                s.light_percent = Some(percent);
            }
            acted
        });
        if acted {
            self.flags.raise(flags::READING_UPDATED);
            self.enqueue(OutboundMessage::LightPercent(percent));
        }
    }

    /// Switch operating mode. Entry actions run inside the mutator:
    ///
    /// - OFF switches every channel off.
    /// - MANUAL keeps channel on/off states and restores full brightness.
    /// - AUTO switches both channels on and recomputes brightness when
    ///   an ambient reading exists.
    pub fn set_mode(&self, mode: Mode) -> WriteOutcome {
        let outcome = self.store.write(|s| {
            if s.mode == mode {
                return WriteOutcome::Unchanged;
            }
            s.mode = mode;
            match mode {
                Mode::Off => {
                    for ch in &mut s.lights {
                        ch.on = false;
                    }
                }
                Mode::Manual => {
                    for ch in &mut s.lights {
                        ch.brightness = self.cfg.brightness_max;
                    }
                }
                Mode::Auto => {
                    let level = s.light_percent.map(|p| brightness_for(&self.cfg, p));
                    for ch in &mut s.lights {
                        ch.on = true;
                        if let Some(level) = level {
                            ch.brightness = level;
                        }
                    }
                }
            }
            WriteOutcome::Applied
        });
        if outcome.applied() {
            self.flags.raise(flags::MODE_UPDATED);
            self.enqueue(OutboundMessage::RoomMode(mode));
        }
        outcome
    }

    /// Explicit on/off command for one channel (button or network).
    /// Passes the authority gate only in MANUAL mode.
    pub fn set_light(&self, id: LightId, on: bool, source: ControlSource) -> WriteOutcome {
        self.mutate_light(id, source, |ch| {
            if ch.on == on {
                WriteOutcome::Unchanged
            } else {
                ch.on = on;
                WriteOutcome::Applied
            }
        })
    }

    /// Flip one channel. Used by the buttons; same gating as
    /// [`set_light`](Self::set_light).
    pub fn toggle_light(&self, id: LightId, source: ControlSource) -> WriteOutcome {
        self.mutate_light(id, source, |ch| {
            ch.on = !ch.on;
            WriteOutcome::Applied
        })
    }

    fn mutate_light(
        &self,
        id: LightId,
        source: ControlSource,
        f: impl FnOnce(&mut LightChannel) -> WriteOutcome,
    ) -> WriteOutcome {
        let outcome = self.store.write(|s| {
            if !write_allowed(source, s.mode) {
                return WriteOutcome::Rejected;
            }
            f(&mut s.lights[id.index()])
        });
        match outcome {
            WriteOutcome::Applied => self.flags.raise(flags::MANUAL_OUTPUT_UPDATED),
            WriteOutcome::Rejected => {
                let mode = self.store.snapshot().mode;
                warn!("room: {source} light command refused in {mode} mode");
            }
            WriteOutcome::Unchanged => {}
        }
        outcome
    }

    /// Record the brightness the automatic algorithm resolved for both
    /// channels. Only the control task calls this, and only in AUTO.
    pub(crate) fn store_auto_brightness(&self, level: u8) {
        self.store.write(|s| {
            for ch in &mut s.lights {
                ch.on = true;
                ch.brightness = level;
            }
        });
    }

    /// Enqueue a status message on behalf of the control task.
    pub(crate) fn announce(&self, msg: OutboundMessage) {
        self.enqueue(msg);
    }

    fn enqueue(&self, msg: OutboundMessage) {
        if let Err(dropped) = self.telemetry.try_enqueue(msg) {
            warn!("room: outbound queue full, dropped {}", dropped.kind());
        }
    }
}
