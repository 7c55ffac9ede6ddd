//! Room lighting path: store writes → flags → control step → light port.

use roomnode::mode::{ControlSource, Mode};
use roomnode::room::{flags, LightId};
use roomnode::room::control::ControlTask;
use roomnode::sync::WriteOutcome;

use crate::mock_hw::{drain_flags, room_fixture, MockLights};

#[test]
fn boot_settles_both_channels_off_exactly_once() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    let mut ctl = ControlTask::new(r, lights.clone());
    ctl.step(0);
    ctl.step(0);
    assert_eq!(lights.history(), vec![(LightId::Led1, 0), (LightId::Led2, 0)]);
}

#[test]
fn auto_mode_dims_against_ambient_light() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    r.record_light(90); // bright room
    let _ = r.set_mode(Mode::Auto);

    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(51));
    assert_eq!(lights.last_level(LightId::Led2), Some(51));

    r.record_light(10); // dark room
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(255));
    assert_eq!(lights.last_level(LightId::Led2), Some(255));
    // The resolved level is written back so MQTT readers see it.
    assert!(r.snapshot().lights.iter().all(|ch| ch.brightness == 255));
}

#[test]
fn auto_without_reading_never_touches_hardware() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    let _ = r.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.call_count(), 0, "no actuation before the first reading");
}

#[test]
fn off_mode_zeroes_both_channels() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    r.record_light(10);
    let _ = r.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(255));

    let _ = r.set_mode(Mode::Off);
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(0));
    assert_eq!(lights.last_level(LightId::Led2), Some(0));

    // Ambient changes in OFF never move the lights.
    r.record_light(90);
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(0));
}

#[test]
fn manual_toggle_drives_one_channel_at_full_brightness() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    let _ = r.set_mode(Mode::Manual);
    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));

    assert!(r.toggle_light(LightId::Led1, ControlSource::Local).applied());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(255));
    assert_eq!(lights.last_level(LightId::Led2), Some(0));

    assert!(r.toggle_light(LightId::Led1, ControlSource::Local).applied());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    assert_eq!(lights.last_level(LightId::Led1), Some(0));
}

#[test]
fn gate_rejections_leave_hardware_untouched() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    r.record_light(50);
    let _ = r.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    let applied_before = lights.call_count();

    assert_eq!(
        r.set_light(LightId::Led1, false, ControlSource::Network),
        WriteOutcome::Rejected
    );
    assert_eq!(
        r.toggle_light(LightId::Led2, ControlSource::Local),
        WriteOutcome::Rejected
    );
    assert_eq!(r.flags().peek(), 0, "rejected writes raise no flags");
    ctl.step(0);
    assert_eq!(lights.call_count(), applied_before);
}

#[test]
fn sub_threshold_ambient_noise_is_ignored() {
    let (r, _q) = room_fixture();
    let lights = MockLights::default();
    r.record_light(50);
    let _ = r.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(r.clone(), lights.clone());
    ctl.step(drain_flags(r.flags(), flags::ALL));
    let applied_before = lights.call_count();

    r.record_light(52); // below the 5 % change threshold
    assert_eq!(r.flags().peek(), 0);
    ctl.step(0);
    assert_eq!(lights.call_count(), applied_before);
}
