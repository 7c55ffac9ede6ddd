//! Thermostat subsystem: temperature-driven fan control.
//!
//! ```text
//!   climate sampler ──┐
//!   target knob ──────┤  store writes + flag raises
//!   network ingress ──┘            │
//!                                  ▼
//!                        FlagGroup::wait_any
//!                                  │
//!                                  ▼
//!                          control task ──▶ FanPort
//! ```
//!
//! All state mutation funnels through the [`Thermostat`] handle, which
//! owns the validation and mode-gating rules. The control task is the
//! only writer of fan hardware.

pub mod control;
pub mod ingress;
pub mod tasks;

use std::sync::Arc;

use log::warn;

use crate::config::ThermostatConfig;
use crate::mode::{write_allowed, ControlSource, Mode};
use crate::sync::{FlagGroup, StateStore, TelemetryQueue, WriteOutcome};
use crate::telemetry::{OutboundMessage, TELEMETRY_QUEUE_DEPTH};

// ── Event flags ─────────────────────────────────────────────────

pub mod flags {
    pub const READING_UPDATED: u32 = 1 << 0;
    pub const TARGET_UPDATED: u32 = 1 << 1;
    pub const TARGET_FROM_NETWORK: u32 = 1 << 2;
    pub const MODE_UPDATED: u32 = 1 << 3;
    pub const MANUAL_OUTPUT_UPDATED: u32 = 1 << 4;

    pub const ALL: u32 = READING_UPDATED
        | TARGET_UPDATED
        | TARGET_FROM_NETWORK
        | MODE_UPDATED
        | MANUAL_OUTPUT_UPDATED;
}

// ── Types ───────────────────────────────────────────────────────

/// Commanded fan output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum FanSpeed {
    #[default]
    Off,
    Low,
    Medium,
    High,
}

impl FanSpeed {
    /// Canonical status-topic payload spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl core::fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The thermostat's single mutable state record.
///
/// Readings start as `None`: until the first valid sample arrives the
/// automatic algorithm has nothing to act on and stays suspended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermostatState {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub target_temp: f32,
    pub fan_speed: FanSpeed,
    /// Last explicitly commanded speed (button or network). Entering
    /// MANUAL restores this, so an AUTO detour cannot erase it.
    pub manual_fan: FanSpeed,
    pub mode: Mode,
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self {
            temperature: None,
            humidity: None,
            target_temp: 25.0,
            fan_speed: FanSpeed::Off,
            manual_fan: FanSpeed::Off,
            mode: Mode::Off,
        }
    }
}

// ── Automatic algorithm ─────────────────────────────────────────

/// Pure band mapping from `|target − current|` to a fan level.
///
/// Bands are half-open: a difference sitting exactly on a boundary
/// resolves to the lower level. Monotone in the difference.
pub fn fan_level(cfg: &ThermostatConfig, target: f32, current: f32) -> FanSpeed {
    let diff = (target - current).abs();
    if diff <= cfg.deadband_c {
        FanSpeed::Off
    } else if diff <= cfg.low_band_c {
        FanSpeed::Low
    } else if diff <= cfg.medium_band_c {
        FanSpeed::Medium
    } else {
        FanSpeed::High
    }
}

// ── Subsystem handle ────────────────────────────────────────────

/// Shared handle bundling the thermostat's store, flag group and the
/// outbound queue. Cheap to clone; one clone per task.
#[derive(Clone)]
pub struct Thermostat {
    store: StateStore<ThermostatState>,
    flags: Arc<FlagGroup>,
    telemetry: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
    cfg: ThermostatConfig,
}

impl Thermostat {
    pub fn new(
        cfg: ThermostatConfig,
        telemetry: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
    ) -> Self {
        Self {
            store: StateStore::new(ThermostatState::default()),
            flags: Arc::new(FlagGroup::new()),
            telemetry,
            cfg,
        }
    }

    pub fn config(&self) -> &ThermostatConfig {
        &self.cfg
    }

    pub fn flags(&self) -> &FlagGroup {
        &self.flags
    }

    pub fn snapshot(&self) -> ThermostatState {
        self.store.snapshot()
    }

    /// Store a fresh temperature sample. Deltas below the change
    /// threshold are sensor noise and ignored entirely; store, flag and
    /// publish move together on an accepted sample, so the control task
    /// is not woken for jitter the fan bands cannot resolve.
    pub fn record_temperature(&self, value: f32) {
        let accepted = self.store.write(|s| {
            let accepted = match s.temperature {
                Some(prev) => (value - prev).abs() >= self.cfg.temp_publish_threshold_c,
                None => true,
            };
            if accepted {
                s.temperature = Some(value);
            }
            accepted
        });
        if accepted {
            self.flags.raise(flags::READING_UPDATED);
            self.enqueue(OutboundMessage::Temperature(value));
        }
    }

    /// Store a fresh humidity sample. Humidity is report-only: it never
    /// influences fan control, so no flag is raised. Same accept
    /// discipline as temperature, with its own percent-scaled threshold.
    pub fn record_humidity(&self, value: f32) {
        let accepted = self.store.write(|s| {
            let accepted = match s.humidity {
                Some(prev) => {
                    (value - prev).abs() >= self.cfg.humidity_publish_threshold_percent
                }
                None => true,
            };
            if accepted {
                s.humidity = Some(value);
            }
            accepted
        });
        if accepted {
            self.enqueue(OutboundMessage::Humidity(value));
        }
    }

    /// Set the target temperature. Setpoint changes are accepted in any
    /// mode (they only take effect in AUTO) but must sit inside the
    /// configured range — out-of-range commands are rejected, not clamped.
    pub fn set_target(&self, value: f32, source: ControlSource) -> WriteOutcome {
        if !(self.cfg.target_min_c..=self.cfg.target_max_c).contains(&value) {
            warn!(
                "thermostat: {source} target {value:.1} °C outside [{:.1}, {:.1}], rejected",
                self.cfg.target_min_c, self.cfg.target_max_c
            );
            return WriteOutcome::Rejected;
        }
        let outcome = self.store.write(|s| {
            if s.target_temp == value {
                WriteOutcome::Unchanged
            } else {
                s.target_temp = value;
                WriteOutcome::Applied
            }
        });
        if outcome.applied() {
            let bit = match source {
                ControlSource::Network => flags::TARGET_FROM_NETWORK,
                _ => flags::TARGET_UPDATED,
            };
            self.flags.raise(bit);
            self.enqueue(OutboundMessage::TargetTemp(value));
        }
        outcome
    }

    /// Switch operating mode. Mode transitions are always external
    /// commands and never gated; entry actions run inside the mutator:
    ///
    /// - OFF zeroes the fan output.
    /// - MANUAL replays the last explicitly commanded speed.
    /// - AUTO recomputes the output immediately when a reading exists.
    pub fn set_mode(&self, mode: Mode) -> WriteOutcome {
        let outcome = self.store.write(|s| {
            if s.mode == mode {
                return WriteOutcome::Unchanged;
            }
            s.mode = mode;
            match mode {
                Mode::Off => s.fan_speed = FanSpeed::Off,
                Mode::Manual => s.fan_speed = s.manual_fan,
                Mode::Auto => {
                    if let Some(current) = s.temperature {
                        s.fan_speed = fan_level(&self.cfg, s.target_temp, current);
                    }
                }
            }
            WriteOutcome::Applied
        });
        if outcome.applied() {
            self.flags.raise(flags::MODE_UPDATED);
            self.enqueue(OutboundMessage::ThermostatMode(mode));
        }
        outcome
    }

    /// Explicit fan command (button or network). Passes the authority
    /// gate only in MANUAL mode.
    pub fn set_fan(&self, speed: FanSpeed, source: ControlSource) -> WriteOutcome {
        let outcome = self.store.write(|s| {
            if !write_allowed(source, s.mode) {
                return WriteOutcome::Rejected;
            }
            s.manual_fan = speed;
            if s.fan_speed == speed {
                WriteOutcome::Unchanged
            } else {
                s.fan_speed = speed;
                WriteOutcome::Applied
            }
        });
        match outcome {
            WriteOutcome::Applied => self.flags.raise(flags::MANUAL_OUTPUT_UPDATED),
            WriteOutcome::Rejected => {
                let mode = self.store.snapshot().mode;
                warn!("thermostat: {source} fan command refused in {mode} mode");
            }
            WriteOutcome::Unchanged => {}
        }
        outcome
    }

    /// Record the output the automatic algorithm resolved. Only the
    /// control task calls this, and only while in AUTO mode; no flag is
    /// raised since the control task is also the consumer.
    pub(crate) fn store_fan(&self, speed: FanSpeed) {
        self.store.write(|s| s.fan_speed = speed);
    }

    /// Enqueue a status message on behalf of the control task.
    pub(crate) fn announce(&self, msg: OutboundMessage) {
        self.enqueue(msg);
    }

    fn enqueue(&self, msg: OutboundMessage) {
        if let Err(dropped) = self.telemetry.try_enqueue(msg) {
            warn!("thermostat: outbound queue full, dropped {}", dropped.kind());
        }
    }
}
