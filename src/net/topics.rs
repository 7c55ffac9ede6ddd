//! MQTT topic vocabulary.
//!
//! `.../set` topics are commands the device subscribes to; the bare
//! topics are status the device publishes. The table is fixed at build
//! time — unknown topics are rejected at ingress, never pattern-matched.

// ── Thermostat ──────────────────────────────────────────────────

pub const THERMOSTAT_TEMP: &str = "home/thermostat/temp";
pub const THERMOSTAT_HUMIDITY: &str = "home/thermostat/humidity";
pub const THERMOSTAT_TARGET: &str = "home/thermostat/target";
pub const THERMOSTAT_TARGET_SET: &str = "home/thermostat/target/set";
pub const THERMOSTAT_MODE: &str = "home/thermostat/mode";
pub const THERMOSTAT_MODE_SET: &str = "home/thermostat/mode/set";
pub const THERMOSTAT_FAN: &str = "home/thermostat/fan";
pub const THERMOSTAT_FAN_SET: &str = "home/thermostat/fan/set";

// ── Room lighting ───────────────────────────────────────────────

pub const ROOM_LIGHT: &str = "home/room/light";
pub const ROOM_MODE: &str = "home/room/mode";
pub const ROOM_MODE_SET: &str = "home/room/mode/set";
pub const ROOM_LED1: &str = "home/room/led1";
pub const ROOM_LED1_SET: &str = "home/room/led1/set";
pub const ROOM_LED2: &str = "home/room/led2";
pub const ROOM_LED2_SET: &str = "home/room/led2/set";

/// Every command topic the device subscribes to at session start.
pub const SUBSCRIPTIONS: &[&str] = &[
    THERMOSTAT_TARGET_SET,
    THERMOSTAT_MODE_SET,
    THERMOSTAT_FAN_SET,
    ROOM_MODE_SET,
    ROOM_LED1_SET,
    ROOM_LED2_SET,
];
