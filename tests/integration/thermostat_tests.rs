//! Thermostat path: store writes → flags → control step → fan port.

use roomnode::mode::{ControlSource, Mode};
use roomnode::sync::WriteOutcome;
use roomnode::thermostat::control::ControlTask;
use roomnode::thermostat::{flags, FanSpeed};

use crate::mock_hw::{drain_flags, thermostat_fixture, MockFan};

#[test]
fn boot_settles_fan_off_exactly_once() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    let mut ctl = ControlTask::new(t, fan.clone());
    ctl.step(0);
    ctl.step(0);
    // The resting state reaches hardware once; repeats are filtered.
    assert_eq!(fan.history(), vec![FanSpeed::Off]);
}

#[test]
fn auto_mode_tracks_reading_changes() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    t.record_temperature(25.0);
    let _ = t.set_target(25.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Auto);

    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(drain_flags(t.flags(), flags::ALL));
    // In the deadband: fan off.
    assert_eq!(fan.last(), Some(FanSpeed::Off));

    t.record_temperature(23.0); // 2.0 °C short of target
    let observed = drain_flags(t.flags(), flags::ALL);
    assert_eq!(observed, flags::READING_UPDATED);
    ctl.step(observed);
    assert_eq!(fan.last(), Some(FanSpeed::Medium));
    assert_eq!(t.snapshot().fan_speed, FanSpeed::Medium);
}

#[test]
fn coalesced_flags_processed_in_one_step() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    // Several updates land before the control task wakes.
    t.record_temperature(20.0);
    let _ = t.set_target(28.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Auto);

    let observed = drain_flags(t.flags(), flags::ALL);
    assert_eq!(
        observed,
        flags::READING_UPDATED | flags::TARGET_FROM_NETWORK | flags::MODE_UPDATED
    );
    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(observed);
    assert_eq!(fan.last(), Some(FanSpeed::High));
    // Flags were consumed atomically: nothing left behind.
    assert_eq!(t.flags().peek(), 0);
}

#[test]
fn auto_without_reading_never_touches_hardware() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    let _ = t.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(flags::MODE_UPDATED);
    assert_eq!(fan.call_count(), 0, "no actuation before the first reading");
}

#[test]
fn off_mode_forces_fan_off_regardless_of_inputs() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    t.record_temperature(10.0);
    let _ = t.set_target(35.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::High));

    let _ = t.set_mode(Mode::Off);
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::Off));

    // Further reading changes in OFF never move the fan.
    t.record_temperature(0.0);
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::Off));
}

#[test]
fn manual_command_survives_a_detour_through_auto() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    t.record_temperature(25.0);
    let _ = t.set_target(25.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Manual);
    assert!(t.set_fan(FanSpeed::High, ControlSource::Network).applied());
    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::High));

    // AUTO takes over (deadband: off), then MANUAL replays the command.
    let _ = t.set_mode(Mode::Auto);
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::Off));
    let _ = t.set_mode(Mode::Manual);
    ctl.step(drain_flags(t.flags(), flags::ALL));
    assert_eq!(fan.last(), Some(FanSpeed::High));
}

#[test]
fn gate_rejections_leave_hardware_untouched() {
    let (t, _q) = thermostat_fixture();
    let fan = MockFan::default();
    t.record_temperature(25.0);
    let _ = t.set_target(25.0, ControlSource::Network);
    let _ = t.set_mode(Mode::Auto);
    let mut ctl = ControlTask::new(t.clone(), fan.clone());
    ctl.step(drain_flags(t.flags(), flags::ALL));
    let applied_before = fan.call_count();

    assert_eq!(
        t.set_fan(FanSpeed::High, ControlSource::Local),
        WriteOutcome::Rejected
    );
    assert_eq!(
        t.set_fan(FanSpeed::High, ControlSource::Network),
        WriteOutcome::Rejected
    );
    assert_eq!(t.flags().peek(), 0, "rejected writes raise no flags");
    ctl.step(0);
    assert_eq!(fan.call_count(), applied_before);
}

#[test]
fn out_of_range_network_target_is_inert() {
    let (t, _q) = thermostat_fixture();
    t.record_temperature(25.0);
    let _ = t.set_mode(Mode::Auto);
    drain_flags(t.flags(), flags::ALL);

    assert_eq!(
        t.set_target(99.0, ControlSource::Network),
        WriteOutcome::Rejected
    );
    assert_eq!(t.flags().peek(), 0);
    assert_eq!(t.snapshot().target_temp, 25.0);
}
