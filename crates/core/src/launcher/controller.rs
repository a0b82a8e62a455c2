//! Launcher arbitration core
//!
//! [`LauncherController`] is the sole authority translating every input
//! source into an actuator command. Three authorities compete for the
//! arm:
//!
//! - the per-cycle mode table ([`hold_command`]),
//! - the operator's manual drive path (gated on Manual mode),
//! - the external closed-loop position controller's correction stream.
//!
//! Mode and launch lockout are orthogonal: the correction stream is never
//! gated by mode, only by an active launch sequence. While a launch pulse
//! runs, no path other than the sequence itself may write the actuator.
//!
//! Every command funnels through one private emission point that clamps,
//! publishes to telemetry, records the value, and writes the ganged
//! drive. Nothing else in the crate touches the motors.

use core::fmt;

use crate::actuator::{GangedDrive, Motor, MotorError};
use crate::parameters::{LauncherParams, ParameterStore};
use crate::telemetry::{keys, TelemetrySink};

use super::mode::{hold_command, LauncherMode};
use super::sequence::{LaunchError, LaunchSequence, LaunchTick};

/// Receives the closed-loop position controller's correction each cycle.
///
/// Production wires the feedback loop's output here; tests drive
/// arbitrary correction sequences through the same seam.
pub trait CorrectionSink {
    /// Accept one correction value.
    ///
    /// The call must always be accepted; whether it reaches the actuator
    /// is the implementation's arbitration decision.
    fn write_correction(&mut self, correction: f32) -> Result<(), MotorError>;
}

/// Errors from launcher operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherError {
    /// Ganged drive rejected a command
    Motor(MotorError),
    /// Launch sequence rejected a start
    Launch(LaunchError),
}

impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherError::Motor(e) => write!(f, "drive error: {e}"),
            LauncherError::Launch(e) => write!(f, "launch error: {e}"),
        }
    }
}

impl core::error::Error for LauncherError {}

impl From<MotorError> for LauncherError {
    fn from(e: MotorError) -> Self {
        LauncherError::Motor(e)
    }
}

impl From<LaunchError> for LauncherError {
    fn from(e: LaunchError) -> Self {
        LauncherError::Launch(e)
    }
}

/// Mode/launch arbitration core for the catapult launcher
pub struct LauncherController<M: Motor, T: TelemetrySink> {
    drive: GangedDrive<M>,
    telemetry: T,
    mode: LauncherMode,
    sequence: LaunchSequence,
    params: LauncherParams,
    last_command: f32,
}

impl<M: Motor, T: TelemetrySink> LauncherController<M, T> {
    /// Create a controller with default calibration.
    pub fn new(drive: GangedDrive<M>, telemetry: T) -> Self {
        Self {
            drive,
            telemetry,
            mode: LauncherMode::Idle,
            sequence: LaunchSequence::new(),
            params: LauncherParams::default(),
            last_command: 0.0,
        }
    }

    /// Reload calibration from the parameter store.
    ///
    /// Called once at session start. Publishes the loaded values so the
    /// dashboard shows what the controller is actually running with.
    pub fn load_params(&mut self, store: &ParameterStore) {
        self.params = LauncherParams::from_store(store);
        self.telemetry.publish(keys::CARRY_POS, self.params.carry_pos);
        self.telemetry.publish(keys::STOW_POS, self.params.stow_pos);
        self.telemetry
            .publish(keys::LAUNCH_TIME, self.params.launch_time_s);
    }

    /// Select the operating mode.
    ///
    /// Unconditional and side-effect free: behavior differences are all
    /// in the per-cycle evaluation, not in the transition.
    pub fn set_mode(&mut self, mode: LauncherMode) {
        self.mode = mode;
    }

    /// Manual drive path.
    ///
    /// Writes the command only in Manual mode; in every other mode the
    /// call is silently discarded so stray manual input cannot cross-talk
    /// into an automatic mode. Locked out during a launch pulse.
    pub fn set_manual(&mut self, speed: f32) -> Result<(), LauncherError> {
        if self.mode != LauncherMode::Manual || self.sequence.is_active() {
            return Ok(());
        }
        self.emit(speed)?;
        Ok(())
    }

    /// Per-cycle mode evaluation.
    ///
    /// Applies the mode table for the given position reading. Issues
    /// nothing in Manual mode and nothing while a launch pulse runs.
    pub fn process_mode(&mut self, position: f32) -> Result<(), LauncherError> {
        self.telemetry.publish(keys::POSITION, position);
        if self.sequence.is_active() {
            return Ok(());
        }
        if let Some(command) = hold_command(self.mode, position, &self.params) {
            self.emit(command)?;
        }
        Ok(())
    }

    /// Begin the timed launch pulse.
    ///
    /// Emits `-speed` (forward throw) and locks out every other actuator
    /// path until the sequence finishes or is aborted. Re-entrant starts
    /// are rejected without disturbing the running pulse.
    pub fn start_launch(&mut self, speed: f32, duration_us: u64) -> Result<(), LauncherError> {
        self.sequence.start(speed, duration_us)?;
        self.telemetry.publish(keys::LAUNCH_SPEED, speed);
        self.emit(-speed)?;
        Ok(())
    }

    /// Advance an active launch by one control tick.
    ///
    /// On the tick where the pulse duration elapses, stops the arm and
    /// re-arms the feedback path.
    pub fn tick(&mut self, dt_us: u64) -> Result<LaunchTick, LauncherError> {
        let result = self.sequence.tick(dt_us);
        if result == LaunchTick::Finished {
            self.emit(0.0)?;
        }
        Ok(result)
    }

    /// Safety cancel for a running launch.
    ///
    /// Stops the arm and re-arms the feedback path regardless of the
    /// remaining pulse time. Returns true if a pulse was aborted.
    pub fn abort_launch(&mut self) -> Result<bool, LauncherError> {
        let was_active = self.sequence.abort();
        if was_active {
            self.emit(0.0)?;
        }
        Ok(was_active)
    }

    /// Current operating mode.
    pub fn mode(&self) -> LauncherMode {
        self.mode
    }

    /// True while a launch pulse is running.
    pub fn launch_active(&self) -> bool {
        self.sequence.is_active()
    }

    /// Last command written to the ganged drive.
    pub fn last_command(&self) -> f32 {
        self.last_command
    }

    /// Loaded calibration.
    pub fn params(&self) -> &LauncherParams {
        &self.params
    }

    /// Telemetry sink access (dashboards, test assertions).
    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    /// Single emission funnel: clamp, publish, record, drive.
    fn emit(&mut self, command: f32) -> Result<(), MotorError> {
        let value = command.clamp(-1.0, 1.0);
        self.telemetry.publish(keys::COMMAND, value);
        self.last_command = value;
        self.drive.set_axis(value)
    }
}

impl<M: Motor, T: TelemetrySink> CorrectionSink for LauncherController<M, T> {
    /// Feedback-loop input.
    ///
    /// The loop's output polarity is opposite the mechanism's forward
    /// convention, so the sign is inverted on the way through. Discarded
    /// (accepted, no side effect) only while a launch pulse runs — the
    /// operating mode never gates this path.
    fn write_correction(&mut self, correction: f32) -> Result<(), MotorError> {
        if self.sequence.is_active() {
            return Ok(());
        }
        self.emit(-correction)
    }
}
