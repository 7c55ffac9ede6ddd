//! System configuration parameters
//!
//! All tunable parameters for the RoomNode firmware, grouped per
//! subsystem. Defaults mirror the values the device ships with.

use serde::{Deserialize, Serialize};

/// Thermostat subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Target setpoint ---
    /// Lowest accepted target temperature (Celsius)
    pub target_min_c: f32,
    /// Highest accepted target temperature (Celsius)
    pub target_max_c: f32,

    // --- Fan bands (absolute target/current difference, Celsius) ---
    /// Difference at or below which the fan stays off
    pub deadband_c: f32,
    /// Difference at or below which the fan runs LOW
    pub low_band_c: f32,
    /// Difference at or below which the fan runs MEDIUM (above: HIGH)
    pub medium_band_c: f32,

    // --- Sampling ---
    /// Temperature/humidity sensor read interval (milliseconds)
    pub sensor_read_interval_ms: u32,
    /// Target-temperature knob read interval (milliseconds)
    pub knob_read_interval_ms: u32,

    // --- Change thresholds ---
    /// Minimum temperature delta worth acting on (Celsius)
    pub temp_publish_threshold_c: f32,
    /// Minimum humidity delta worth publishing (percent RH)
    pub humidity_publish_threshold_percent: f32,
    /// Minimum knob movement treated as an intentional change (Celsius)
    pub target_change_threshold_c: f32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            target_min_c: 15.0,
            target_max_c: 35.0,

            deadband_c: 0.5,
            low_band_c: 1.5,
            medium_band_c: 3.0,

            sensor_read_interval_ms: 3_000,
            knob_read_interval_ms: 3_000,

            temp_publish_threshold_c: 0.1,
            humidity_publish_threshold_percent: 1.0,
            target_change_threshold_c: 1.0,
        }
    }
}

/// Room lighting subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    // --- Ambient-light thresholds (percent) ---
    /// Below this the room is dark: full brightness
    pub dark_threshold_percent: u8,
    /// Above this the room is bright: minimum brightness
    pub bright_threshold_percent: u8,

    // --- Brightness endpoints (PWM duty, 0-255) ---
    /// Brightness applied in a dark room
    pub brightness_max: u8,
    /// Brightness applied in a bright room
    pub brightness_min: u8,

    // --- Sampling ---
    /// LDR read interval (milliseconds)
    pub sensor_read_interval_ms: u32,
    /// Button scan debounce interval (milliseconds)
    pub button_debounce_ms: u32,
    /// Minimum ambient-light delta worth acting on (percent)
    pub light_change_threshold_percent: u8,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            dark_threshold_percent: 30,
            bright_threshold_percent: 70,

            brightness_max: 255,
            brightness_min: 51,

            sensor_read_interval_ms: 5_000,
            button_debounce_ms: 200,
            light_change_threshold_percent: 5,
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// WiFi station SSID
    pub wifi_ssid: String,
    /// WiFi station password (empty means an open network)
    pub wifi_pass: String,
    /// MQTT broker URL, e.g. `mqtt://192.168.1.10:1883`
    pub broker_url: String,
    /// MQTT client identifier
    pub client_id: String,
    /// Telemetry drain poll interval (milliseconds)
    pub egress_poll_interval_ms: u32,
    /// WiFi reconnect backoff (milliseconds)
    pub wifi_retry_interval_ms: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_pass: String::new(),
            broker_url: "mqtt://192.168.1.10:1883".into(),
            client_id: "roomnode".into(),
            egress_poll_interval_ms: 500,
            wifi_retry_interval_ms: 5_000,
        }
    }
}

/// Aggregated device configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    pub thermostat: ThermostatConfig,
    pub room: RoomConfig,
    pub network: NetworkConfig,
}
