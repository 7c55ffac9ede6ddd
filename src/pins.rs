//! Board pin map and peripheral channel assignments.
//!
//! Analog inputs live on ADC1 (GPIO32-35 on the devkit), the fan
//! indicator outputs are plain GPIOs, and the two room LEDs sit on LEDC
//! PWM channels.

// ── Analog inputs (ADC1) ────────────────────────────────────────

pub const POT_TEMP_GPIO: i32 = 34;
pub const POT_HUMIDITY_GPIO: i32 = 35;
pub const POT_TARGET_GPIO: i32 = 32;
pub const LDR_GPIO: i32 = 33;

/// ADC1 channel numbers for the pins above.
pub const ADC1_CH_TEMP: u32 = 6; // GPIO34
pub const ADC1_CH_HUMIDITY: u32 = 7; // GPIO35
pub const ADC1_CH_TARGET: u32 = 4; // GPIO32
pub const ADC1_CH_LDR: u32 = 5; // GPIO33

// ── Fan indicator outputs ───────────────────────────────────────

pub const FAN_LOW_GPIO: i32 = 25;
pub const FAN_MED_GPIO: i32 = 26;
pub const FAN_HIGH_GPIO: i32 = 27;

// ── Room lighting (LEDC PWM) ────────────────────────────────────

pub const ROOM_LED1_GPIO: i32 = 16;
pub const ROOM_LED2_GPIO: i32 = 17;

pub const LEDC_CH_LED1: u32 = 0;
pub const LEDC_CH_LED2: u32 = 1;

pub const LED_PWM_FREQ_HZ: u32 = 5_000;

// ── Buttons (active-low, internal pull-up) ──────────────────────

pub const BUTTON1_GPIO: i32 = 18;
pub const BUTTON2_GPIO: i32 = 19;
