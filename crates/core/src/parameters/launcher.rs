//! Launcher Parameter Definitions
//!
//! Calibration block for the catapult launcher, loaded once at the start
//! of each operator-control session.
//!
//! # Parameters
//!
//! - `CATA_CARRY_POS` - Pickup hold threshold, potentiometer volts
//! - `CATA_STOW_POS` - Carry hold threshold, potentiometer volts
//! - `CATA_LAUNCH_TIME` - Launch pulse duration, seconds
//!
//! The two position thresholds are compared in opposite directions
//! (Pickup holds while `position < CATA_CARRY_POS`, Carry holds while
//! `position > CATA_STOW_POS`) with carry above stow, forming a deadband
//! between the two hold bands. Calibrate against the real sensor before
//! changing either.

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default carry-position threshold (potentiometer volts)
const DEFAULT_CARRY_POS: f32 = 2.15;

/// Default stow-position threshold (potentiometer volts)
const DEFAULT_STOW_POS: f32 = 1.9;

/// Default launch pulse duration in seconds
const DEFAULT_LAUNCH_TIME: f32 = 0.3;

/// Potentiometer travel limits (volts)
const MIN_POSITION: f32 = 0.0;
const MAX_POSITION: f32 = 5.0;

/// Launch duration limits in seconds
const MIN_LAUNCH_TIME: f32 = 0.05;
const MAX_LAUNCH_TIME: f32 = 2.0;

/// Launcher calibration loaded from the parameter store
#[derive(Debug, Clone)]
pub struct LauncherParams {
    /// Pickup hold threshold (potentiometer volts)
    pub carry_pos: f32,
    /// Carry hold threshold (potentiometer volts)
    pub stow_pos: f32,
    /// Launch pulse duration (seconds)
    pub launch_time_s: f32,
}

impl Default for LauncherParams {
    fn default() -> Self {
        Self {
            carry_pos: DEFAULT_CARRY_POS,
            stow_pos: DEFAULT_STOW_POS,
            launch_time_s: DEFAULT_LAUNCH_TIME,
        }
    }
}

impl LauncherParams {
    /// Register launcher parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "CATA_CARRY_POS",
            ParamValue::Float(DEFAULT_CARRY_POS),
            ParamFlags::empty(),
        )?;
        store.register(
            "CATA_STOW_POS",
            ParamValue::Float(DEFAULT_STOW_POS),
            ParamFlags::empty(),
        )?;
        store.register(
            "CATA_LAUNCH_TIME",
            ParamValue::Float(DEFAULT_LAUNCH_TIME),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load launcher parameters from the store.
    ///
    /// Missing or mistyped keys fall back to the defaults; numeric values
    /// are clamped to the calibration range.
    pub fn from_store(store: &ParameterStore) -> Self {
        let carry_pos = match store.get("CATA_CARRY_POS").and_then(ParamValue::as_float) {
            Some(v) => v.clamp(MIN_POSITION, MAX_POSITION),
            None => DEFAULT_CARRY_POS,
        };

        let stow_pos = match store.get("CATA_STOW_POS").and_then(ParamValue::as_float) {
            Some(v) => v.clamp(MIN_POSITION, MAX_POSITION),
            None => DEFAULT_STOW_POS,
        };

        let launch_time_s = match store.get("CATA_LAUNCH_TIME").and_then(ParamValue::as_float) {
            Some(v) => v.clamp(MIN_LAUNCH_TIME, MAX_LAUNCH_TIME),
            None => DEFAULT_LAUNCH_TIME,
        };

        Self {
            carry_pos,
            stow_pos,
            launch_time_s,
        }
    }

    /// Launch pulse duration in microseconds, for the tick-driven sequence.
    pub fn launch_time_us(&self) -> u64 {
        (self.launch_time_s * 1_000_000.0) as u64
    }

    /// Validate the calibration block.
    ///
    /// Requires in-range values and carry above stow, so the two hold
    /// bands keep their deadband.
    pub fn is_valid(&self) -> bool {
        if !(MIN_POSITION..=MAX_POSITION).contains(&self.carry_pos) {
            return false;
        }
        if !(MIN_POSITION..=MAX_POSITION).contains(&self.stow_pos) {
            return false;
        }
        if !(MIN_LAUNCH_TIME..=MAX_LAUNCH_TIME).contains(&self.launch_time_s) {
            return false;
        }
        self.carry_pos > self.stow_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_params_defaults() {
        let params = LauncherParams::default();

        assert!((params.carry_pos - 2.15).abs() < 0.001);
        assert!((params.stow_pos - 1.9).abs() < 0.001);
        assert!((params.launch_time_s - 0.3).abs() < 0.001);
        assert_eq!(params.launch_time_us(), 300_000);
        assert!(params.is_valid());
    }

    #[test]
    fn test_launcher_params_from_store() {
        let mut store = ParameterStore::new();
        LauncherParams::register_defaults(&mut store).unwrap();

        let params = LauncherParams::from_store(&store);
        assert!((params.carry_pos - 2.15).abs() < 0.001);
        assert!((params.stow_pos - 1.9).abs() < 0.001);
    }

    #[test]
    fn test_launcher_params_from_store_custom() {
        let mut store = ParameterStore::new();
        LauncherParams::register_defaults(&mut store).unwrap();

        store.set("CATA_CARRY_POS", ParamValue::Float(2.4)).unwrap();
        store.set("CATA_LAUNCH_TIME", ParamValue::Float(0.5)).unwrap();

        let params = LauncherParams::from_store(&store);
        assert!((params.carry_pos - 2.4).abs() < 0.001);
        assert!((params.launch_time_s - 0.5).abs() < 0.001);
        assert_eq!(params.launch_time_us(), 500_000);
    }

    #[test]
    fn test_launcher_params_empty_store_falls_back() {
        let store = ParameterStore::new();
        let params = LauncherParams::from_store(&store);

        assert!((params.carry_pos - 2.15).abs() < 0.001);
        assert!((params.stow_pos - 1.9).abs() < 0.001);
        assert!((params.launch_time_s - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_launcher_params_mistyped_falls_back() {
        let mut store = ParameterStore::new();
        store
            .register("CATA_CARRY_POS", ParamValue::Bool(true), ParamFlags::empty())
            .unwrap();

        let params = LauncherParams::from_store(&store);
        assert!((params.carry_pos - 2.15).abs() < 0.001);
    }

    #[test]
    fn test_launcher_params_int_widens() {
        let mut store = ParameterStore::new();
        LauncherParams::register_defaults(&mut store).unwrap();
        store.set("CATA_CARRY_POS", ParamValue::Int(3)).unwrap();

        let params = LauncherParams::from_store(&store);
        assert!((params.carry_pos - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_launcher_params_clamped() {
        let mut store = ParameterStore::new();
        LauncherParams::register_defaults(&mut store).unwrap();
        store.set("CATA_STOW_POS", ParamValue::Float(-1.0)).unwrap();
        store.set("CATA_LAUNCH_TIME", ParamValue::Float(10.0)).unwrap();

        let params = LauncherParams::from_store(&store);
        assert!((params.stow_pos - 0.0).abs() < 0.001);
        assert!((params.launch_time_s - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_is_valid_requires_deadband() {
        let params = LauncherParams {
            carry_pos: 1.5,
            stow_pos: 1.9,
            launch_time_s: 0.3,
        };
        assert!(!params.is_valid());
    }
}
