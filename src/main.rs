//! RoomNode Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  PotSensor / LdrSensor   FanDriver / LightDriver             │
//! │  GpioButton              MqttPublisher · WiFi station        │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │   Thermostat / Room handles (store · flags · gate) │      │
//! │  │   sampling tasks → control tasks → egress task     │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use log::info;

    use roomnode::config::SystemConfig;
    use roomnode::drivers::adc::{LdrSensor, PotSensor};
    use roomnode::drivers::button::GpioButton;
    use roomnode::drivers::fan::FanDriver;
    use roomnode::drivers::hw;
    use roomnode::drivers::lights::LightDriver;
    use roomnode::net::egress::EgressTask;
    use roomnode::net::{mqtt, wifi};
    use roomnode::pins;
    use roomnode::room::tasks::{ButtonScanner, LightSampler};
    use roomnode::room::Room;
    use roomnode::sync::TelemetryQueue;
    use roomnode::telemetry::OutboundMessage;
    use roomnode::thermostat::tasks::{ClimateSampler, KnobSampler};
    use roomnode::thermostat::Thermostat;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RoomNode v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Hardware peripherals ───────────────────────────────
    if let Err(e) = hw::init_peripherals() {
        // Peripheral init failure is critical — log and halt; the task
        // watchdog resets the chip after its timeout.
        log::error!("hw init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration ──────────────────────────────────────
    // Build-time overrides for the network settings; everything else
    // runs on the shipped defaults.
    let mut config = SystemConfig::default();
    if let Some(ssid) = option_env!("ROOMNODE_WIFI_SSID") {
        config.network.wifi_ssid = ssid.into();
    }
    if let Some(pass) = option_env!("ROOMNODE_WIFI_PASS") {
        config.network.wifi_pass = pass.into();
    }
    if let Some(url) = option_env!("ROOMNODE_MQTT_URL") {
        config.network.broker_url = url.into();
    }

    // ── 4. Connectivity ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // Handle must stay alive for the link to persist.
    let _wifi = wifi::connect_station(peripherals.modem, sys_loop, nvs, &config.network)?;

    let (publisher, connection) = mqtt::connect(&config.network)?;
    // The client exists and is subscribed at this point, so the link
    // starts advisory-up; the receive loop flips it down on the first
    // connection error. Starting down would drop the boot announcements
    // below before the first broker event arrives.
    let online = Arc::new(AtomicBool::new(true));

    // ── 5. Subsystem handles ──────────────────────────────────
    let telemetry = Arc::new(TelemetryQueue::new());
    let thermostat = Thermostat::new(config.thermostat.clone(), Arc::clone(&telemetry));
    let room = Room::new(config.room.clone(), Arc::clone(&telemetry));

    mqtt::spawn_receiver(
        thermostat.clone(),
        room.clone(),
        publisher.clone(),
        connection,
        Arc::clone(&online),
    )?;

    // ── 6. Task spawn ─────────────────────────────────────────
    let thermostat_cfg = &config.thermostat;
    let climate = ClimateSampler::new(
        thermostat.clone(),
        PotSensor::new(
            pins::ADC1_CH_TEMP,
            thermostat_cfg.target_min_c,
            thermostat_cfg.target_max_c,
        ),
        PotSensor::new(pins::ADC1_CH_HUMIDITY, 20.0, 90.0),
    );
    let knob = KnobSampler::new(
        thermostat.clone(),
        PotSensor::new(
            pins::ADC1_CH_TARGET,
            thermostat_cfg.target_min_c,
            thermostat_cfg.target_max_c,
        ),
    );
    let thermostat_ctl =
        roomnode::thermostat::control::ControlTask::new(thermostat.clone(), FanDriver::new());

    let ldr = LightSampler::new(room.clone(), LdrSensor::new(pins::ADC1_CH_LDR));
    let buttons = ButtonScanner::new(
        room.clone(),
        GpioButton::new(pins::BUTTON1_GPIO),
        GpioButton::new(pins::BUTTON2_GPIO),
    );
    let room_ctl = roomnode::room::control::ControlTask::new(room.clone(), LightDriver::new());

    let egress = EgressTask::new(
        Arc::clone(&telemetry),
        publisher,
        Arc::clone(&online),
        Duration::from_millis(config.network.egress_poll_interval_ms.into()),
    );

    thread::Builder::new()
        .name("climate-sampler".into())
        .stack_size(8 * 1024)
        .spawn(move || climate.run())?;
    thread::Builder::new()
        .name("target-knob".into())
        .stack_size(8 * 1024)
        .spawn(move || knob.run())?;
    thread::Builder::new()
        .name("thermostat-ctl".into())
        .stack_size(8 * 1024)
        .spawn(move || thermostat_ctl.run())?;
    thread::Builder::new()
        .name("ldr-sampler".into())
        .stack_size(8 * 1024)
        .spawn(move || ldr.run())?;
    thread::Builder::new()
        .name("button-scan".into())
        .stack_size(8 * 1024)
        .spawn(move || buttons.run())?;
    thread::Builder::new()
        .name("room-ctl".into())
        .stack_size(8 * 1024)
        .spawn(move || room_ctl.run())?;
    thread::Builder::new()
        .name("net-egress".into())
        .stack_size(12 * 1024)
        .spawn(move || egress.run())?;

    // Announce the boot-time mode on the status topics.
    let _ = telemetry.try_enqueue(OutboundMessage::ThermostatMode(thermostat.snapshot().mode));
    let _ = telemetry.try_enqueue(OutboundMessage::RoomMode(room.snapshot().mode));

    info!("RoomNode ready");

    // The main task has nothing left to do; everything lives in the
    // spawned tasks.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("the roomnode binary only runs on the ESP32 target");
}
