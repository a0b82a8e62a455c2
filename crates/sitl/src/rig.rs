//! Built-in catapult mechanism simulation.
//!
//! Self-contained physics with no external dependencies, suitable for CI
//! and unit testing. The arm is modeled as a potentiometer voltage driven
//! by the net command of the four ganged motors, with first-order rate
//! limiting, travel stops, gravity drift, and optional seeded sensor
//! noise for deterministic runs.
//!
//! The rig hands out four [`RigChannel`] motor handles so the core's
//! `GangedDrive` wiring is exercised end to end: net drive is computed
//! from the left pair minus the right pair, i.e. the mirrored sign
//! convention must hold for the arm to move at all.

use std::cell::RefCell;
use std::rc::Rc;

use catapult_core::actuator::{Motor, MotorError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SimError;

/// Configuration for the catapult rig.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Arm rate at full command, potentiometer volts per second.
    pub max_rate_vps: f32,
    /// Lower travel stop (volts).
    pub pot_min_v: f32,
    /// Upper travel stop (volts).
    pub pot_max_v: f32,
    /// Arm position at session start (volts).
    pub initial_position_v: f32,
    /// Gravity drift toward the lower stop, volts per second.
    pub gravity_vps: f32,
    /// Uniform sensor noise bound (volts). Zero disables noise.
    pub noise_v: f32,
    /// RNG seed for deterministic runs.
    pub seed: u64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            max_rate_vps: 2.0,
            pot_min_v: 0.5,
            pot_max_v: 4.5,
            initial_position_v: 2.0,
            gravity_vps: 0.0,
            noise_v: 0.0,
            seed: 42,
        }
    }
}

impl RigConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.pot_min_v >= self.pot_max_v {
            return Err(SimError::InvalidConfig("pot_min_v must be below pot_max_v"));
        }
        if !(self.pot_min_v..=self.pot_max_v).contains(&self.initial_position_v) {
            return Err(SimError::InvalidConfig(
                "initial_position_v outside travel stops",
            ));
        }
        if self.max_rate_vps <= 0.0 {
            return Err(SimError::InvalidConfig("max_rate_vps must be positive"));
        }
        if self.noise_v < 0.0 {
            return Err(SimError::InvalidConfig("noise_v must be non-negative"));
        }
        Ok(())
    }
}

/// Shared electrical state between the rig and its motor channels.
#[derive(Debug, Default)]
struct RigState {
    /// Last commanded speed per channel, left pair then right pair.
    channels: [f32; 4],
}

/// One simulated motor controller wired into the rig.
pub struct RigChannel {
    state: Rc<RefCell<RigState>>,
    index: usize,
}

impl Motor for RigChannel {
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError> {
        if !(-1.0..=1.0).contains(&speed) {
            return Err(MotorError::InvalidSpeed);
        }
        self.state.borrow_mut().channels[self.index] = speed;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        self.state.borrow_mut().channels[self.index] = 0.0;
        Ok(())
    }
}

/// Simulated single-axis catapult mechanism.
pub struct CatapultRig {
    config: RigConfig,
    state: Rc<RefCell<RigState>>,
    position_v: f32,
    rng: StdRng,
    sim_time_us: u64,
    step_count: u64,
}

impl CatapultRig {
    /// Create a rig from a validated configuration.
    pub fn new(config: RigConfig) -> Result<Self, SimError> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let position_v = config.initial_position_v;
        Ok(Self {
            config,
            state: Rc::new(RefCell::new(RigState::default())),
            position_v,
            rng,
            sim_time_us: 0,
            step_count: 0,
        })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RigConfig::default()).expect("default rig config is valid")
    }

    /// Hand out the four motor channels, left pair then right pair.
    ///
    /// Call once when wiring the ganged drive.
    pub fn channels(&self) -> ([RigChannel; 2], [RigChannel; 2]) {
        let ch = |index| RigChannel {
            state: Rc::clone(&self.state),
            index,
        };
        ([ch(0), ch(1)], [ch(2), ch(3)])
    }

    /// Net axis command seen by the mechanism.
    ///
    /// Left pair drives positive, right pair is mechanically mirrored, so
    /// the pairs only add up when the electrical signs are mirrored too.
    pub fn net_command(&self) -> f32 {
        let ch = self.state.borrow().channels;
        (ch[0] + ch[1] - ch[2] - ch[3]) / 4.0
    }

    /// Integrate the mechanism for one time step.
    ///
    /// Positive net command pulls the arm down (position decreases);
    /// the launch throw's negative command swings it up. Position is
    /// clamped at the travel stops.
    pub fn step(&mut self, dt_us: u64) {
        let dt = dt_us as f32 / 1_000_000.0;
        let rate = -self.net_command() * self.config.max_rate_vps - self.config.gravity_vps;
        self.position_v =
            (self.position_v + rate * dt).clamp(self.config.pot_min_v, self.config.pot_max_v);
        self.sim_time_us += dt_us;
        self.step_count += 1;
    }

    /// Potentiometer reading, with sensor noise if configured.
    pub fn position(&mut self) -> f32 {
        if self.config.noise_v > 0.0 {
            let noise = self.rng.gen_range(-self.config.noise_v..=self.config.noise_v);
            (self.position_v + noise).clamp(self.config.pot_min_v, self.config.pot_max_v)
        } else {
            self.position_v
        }
    }

    /// Noise-free arm position (volts).
    pub fn true_position(&self) -> f32 {
        self.position_v
    }

    /// Simulation time in microseconds.
    pub fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    /// Number of integration steps taken.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}
