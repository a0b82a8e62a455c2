//! Launch-pulse scenarios through the SITL bridge.
//!
//! The default calibration gives a 0.3 s pulse; at the bridge's 5 ms
//! tick that is 60 control cycles from trigger to stop.

use catapult_core::input::OperatorInput;
use catapult_core::launcher::{LaunchError, LauncherError, LauncherMode};
use catapult_core::parameters::{LauncherParams, ParameterStore};
use catapult_sitl::{BridgeConfig, SimBridge};

fn store() -> ParameterStore {
    let mut store = ParameterStore::new();
    LauncherParams::register_defaults(&mut store).unwrap();
    store
}

fn launch_input(axis_v: f32) -> OperatorInput {
    OperatorInput {
        launch_trigger: true,
        launch_axis_raw: axis_v,
        ..Default::default()
    }
}

#[test]
fn launch_pulse_holds_command_for_duration_then_stops() {
    let config = BridgeConfig {
        feedback_enabled: true,
        ..Default::default()
    };
    let mut bridge = SimBridge::new(config, &store()).unwrap();

    // Full power: 5.0 V on the dial scales to speed 1.0, thrown forward
    // as command -1.0. The trigger also forces the mode to Idle.
    bridge.set_input(launch_input(5.0));
    let report = bridge.step().unwrap();
    assert!(report.launch_active);
    assert_eq!(report.mode, LauncherMode::Idle);
    assert_eq!(report.command, -1.0);
    bridge.set_input(OperatorInput::default());

    // The pulse command must survive 58 more cycles of the feedback loop
    // pushing the other way.
    for _ in 0..58 {
        let report = bridge.step().unwrap();
        assert!(report.launch_active);
        assert_eq!(report.command, -1.0);
    }

    // Cycle 60: the pulse duration elapses and the arm is stopped.
    let report = bridge.step().unwrap();
    assert!(!report.launch_active);
    assert_eq!(report.command, 0.0);

    // Next cycle the feedback loop owns the arm again, pulling the
    // thrown arm back toward the setpoint.
    let report = bridge.step().unwrap();
    assert!(report.command > 0.0);
}

#[test]
fn launch_speed_follows_power_dial() {
    let mut bridge = SimBridge::new(BridgeConfig::default(), &store()).unwrap();

    // Dial at zero still throws at the bottom of the band.
    bridge.set_input(launch_input(0.0));
    let report = bridge.step().unwrap();
    assert!(report.launch_active);
    assert!((report.command - (-0.5)).abs() < 1e-3);
}

#[test]
fn launch_reentry_rejected_mid_pulse() {
    let mut bridge = SimBridge::new(BridgeConfig::default(), &store()).unwrap();
    bridge.set_input(launch_input(2.5));
    bridge.step().unwrap();
    bridge.set_input(OperatorInput::default());
    bridge.step().unwrap();

    let err = bridge
        .controller_mut()
        .start_launch(0.8, 100_000)
        .unwrap_err();
    assert_eq!(err, LauncherError::Launch(LaunchError::AlreadyActive));

    // The running pulse keeps its own speed (2.5 V dial -> 0.75).
    let report = bridge.step().unwrap();
    assert!(report.launch_active);
    assert!((report.command - (-0.75)).abs() < 1e-3);
}

#[test]
fn held_trigger_refires_but_never_restarts_mid_pulse() {
    let mut bridge = SimBridge::new(BridgeConfig::default(), &store()).unwrap();
    bridge.set_input(launch_input(5.0));

    // Trigger held for the whole pulse. A mid-pulse restart would reset
    // the remaining time and the pulse would not end on cycle 60.
    bridge.step().unwrap();
    for _ in 0..58 {
        let report = bridge.step().unwrap();
        assert!(report.launch_active);
    }
    let report = bridge.step().unwrap();
    assert!(!report.launch_active);
    assert_eq!(report.command, 0.0);

    // Still held: the next cycle fires a fresh pulse.
    let report = bridge.step().unwrap();
    assert!(report.launch_active);
    assert_eq!(report.command, -1.0);
}

#[test]
fn abort_stops_pulse_and_rearms_feedback() {
    let config = BridgeConfig {
        feedback_enabled: true,
        setpoint_v: 2.0,
        ..Default::default()
    };
    let mut bridge = SimBridge::new(config, &store()).unwrap();
    bridge.set_input(launch_input(5.0));
    bridge.step().unwrap();
    bridge.set_input(OperatorInput::default());
    for _ in 0..9 {
        bridge.step().unwrap();
    }

    assert!(bridge.controller_mut().abort_launch().unwrap());
    assert!(!bridge.controller().launch_active());
    assert_eq!(bridge.controller().last_command(), 0.0);

    // The position loop resumes and brings the arm back home.
    let settled = bridge.run_for_us(3_000_000).unwrap();
    assert!((settled.position_v - 2.0).abs() < 0.05);
}

#[test]
fn mode_select_latches_during_pulse_without_driving() {
    let mut bridge = SimBridge::new(BridgeConfig::default(), &store()).unwrap();
    bridge.set_input(launch_input(5.0));
    bridge.step().unwrap();

    // Operator selects Carry mid-throw: the mode latches, but the mode
    // table stays locked out until the pulse ends.
    bridge.set_input(OperatorInput {
        carry_select: true,
        ..Default::default()
    });
    let report = bridge.step().unwrap();
    assert_eq!(report.mode, LauncherMode::Carry);
    assert_eq!(report.command, -1.0);

    for _ in 0..58 {
        bridge.step().unwrap();
    }
    assert!(!bridge.controller().launch_active());

    // The throw carried the arm past the stow threshold; Carry now
    // drives it back down.
    let report = bridge.step().unwrap();
    assert_eq!(report.command, 0.2);
}
