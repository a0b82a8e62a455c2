//! Lockstep control-loop harness.
//!
//! One `step()` is one control tick of the single-threaded cooperative
//! loop: sensor read → operator input → mode evaluation → feedback
//! correction → launch tick → mechanism integration, at a fixed period.
//! Simulation time is a `MockTime` the bridge advances itself, so runs
//! are deterministic regardless of host timing.

use std::time::Instant;

use catapult_core::actuator::GangedDrive;
use catapult_core::input::OperatorInput;
use catapult_core::launcher::{CorrectionSink, LauncherController, LauncherMode};
use catapult_core::parameters::ParameterStore;
use catapult_core::scheduler::{TaskMetadata, TaskStats};
use catapult_core::telemetry::RecordingTelemetry;
use catapult_core::traits::{MockTime, TimeSource};

use crate::error::SimError;
use crate::feedback::{LoopGains, PositionLoop};
use crate::rig::{CatapultRig, RigChannel, RigConfig};

/// Control task accounting for the bridge loop.
const CONTROL_TASK: TaskMetadata = TaskMetadata {
    name: "launcher_ctl",
    rate_hz: 200,
    budget_us: 4_000,
};

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Control tick period in microseconds.
    pub step_size_us: u64,
    /// Position-loop gains.
    pub gains: LoopGains,
    /// Initial position-loop setpoint (volts).
    pub setpoint_v: f32,
    /// Mechanism configuration.
    pub rig: RigConfig,
    /// Whether the external position loop runs.
    pub feedback_enabled: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            step_size_us: 5_000, // 200 Hz, matching the operator loop
            gains: LoopGains::default(),
            setpoint_v: 2.0,
            rig: RigConfig::default(),
            feedback_enabled: false,
        }
    }
}

/// Snapshot of one control tick.
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    /// Simulation time after the tick (microseconds).
    pub sim_time_us: u64,
    /// Noise-free arm position after the tick (volts).
    pub position_v: f32,
    /// Command on the ganged axis after the tick.
    pub command: f32,
    /// Operating mode after the tick.
    pub mode: LauncherMode,
    /// True while a launch pulse is running.
    pub launch_active: bool,
}

/// Software-in-the-loop bridge between the control core and the rig.
pub struct SimBridge {
    rig: CatapultRig,
    controller: LauncherController<RigChannel, RecordingTelemetry>,
    feedback: PositionLoop,
    feedback_enabled: bool,
    input: OperatorInput,
    time: MockTime,
    step_size_us: u64,
    stats: TaskStats,
}

impl SimBridge {
    /// Build the full loop: rig, ganged drive, controller, position loop.
    ///
    /// Calibration is loaded from `store` exactly once, session-start
    /// semantics.
    pub fn new(config: BridgeConfig, store: &ParameterStore) -> Result<Self, SimError> {
        let rig = CatapultRig::new(config.rig)?;
        let (left, right) = rig.channels();
        let drive = GangedDrive::new(left, right);

        let mut controller = LauncherController::new(drive, RecordingTelemetry::new());
        controller.load_params(store);

        Ok(Self {
            rig,
            controller,
            feedback: PositionLoop::new(config.gains, config.setpoint_v),
            feedback_enabled: config.feedback_enabled,
            input: OperatorInput::default(),
            time: MockTime::new(),
            step_size_us: config.step_size_us,
            stats: TaskStats::default(),
        })
    }

    /// Stage the operator input applied on subsequent ticks.
    pub fn set_input(&mut self, input: OperatorInput) {
        self.input = input;
    }

    /// Enable or disable the external position loop.
    pub fn set_feedback_enabled(&mut self, enabled: bool) {
        self.feedback_enabled = enabled;
        self.feedback.reset();
    }

    /// Retarget the position loop.
    pub fn set_setpoint(&mut self, setpoint_v: f32) {
        self.feedback.set_setpoint(setpoint_v);
    }

    /// Run one control tick.
    pub fn step(&mut self) -> Result<StepReport, SimError> {
        let started = Instant::now();
        let dt_s = self.step_size_us as f32 / 1_000_000.0;

        // 1. Sensor read.
        let position = self.rig.position();

        // 2. Operator input: mode select, manual nudge, launch trigger.
        if let Some(mode) = self.input.requested_mode() {
            self.controller.set_mode(mode);
        }
        self.controller.set_manual(self.input.manual_speed())?;
        if self.input.launch_requested() && !self.controller.launch_active() {
            let duration_us = self.controller.params().launch_time_us();
            self.controller
                .start_launch(self.input.launch_speed(), duration_us)?;
        }

        // 3. Mode table.
        self.controller.process_mode(position)?;

        // 4. Feedback loop. On the robot this fires from its own timer
        // between operator-loop passes, so it is the tick's last writer;
        // the core still discards it during a launch pulse.
        if self.feedback_enabled {
            let correction = self.feedback.update(position, dt_s);
            self.controller
                .write_correction(correction)
                .map_err(catapult_core::launcher::LauncherError::Motor)?;
        }

        // 5. Advance a running launch by this tick.
        self.controller.tick(self.step_size_us)?;

        // 6. Mechanism integration and time.
        self.rig.step(self.step_size_us);
        self.time.advance(self.step_size_us);

        let execution_us = started.elapsed().as_micros().min(u32::MAX as u128) as u32;
        self.stats.update(execution_us, CONTROL_TASK.budget_us);

        Ok(StepReport {
            sim_time_us: self.time.now_us(),
            position_v: self.rig.true_position(),
            command: self.controller.last_command(),
            mode: self.controller.mode(),
            launch_active: self.controller.launch_active(),
        })
    }

    /// Run ticks until at least `duration_us` of simulation time passes.
    pub fn run_for_us(&mut self, duration_us: u64) -> Result<StepReport, SimError> {
        let target = self.time.now_us() + duration_us;
        let mut report = self.step()?;
        while self.time.now_us() < target {
            report = self.step()?;
        }
        Ok(report)
    }

    /// Control-tick period in microseconds.
    pub fn step_size_us(&self) -> u64 {
        self.step_size_us
    }

    /// Simulation time in microseconds.
    pub fn sim_time_us(&self) -> u64 {
        self.time.now_us()
    }

    /// Noise-free arm position (volts).
    pub fn position(&self) -> f32 {
        self.rig.true_position()
    }

    /// Controller access for assertions and dashboards.
    pub fn controller(&self) -> &LauncherController<RigChannel, RecordingTelemetry> {
        &self.controller
    }

    /// Mutable controller access (abort paths, direct drives).
    pub fn controller_mut(&mut self) -> &mut LauncherController<RigChannel, RecordingTelemetry> {
        &mut self.controller
    }

    /// Loop accounting collected so far.
    pub fn stats(&self) -> &TaskStats {
        &self.stats
    }

    /// Name of the control task, for log lines.
    pub fn task_name(&self) -> &'static str {
        CONTROL_TASK.name
    }
}
