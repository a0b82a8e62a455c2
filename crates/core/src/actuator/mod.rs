//! Motor abstraction and the ganged launcher drive
//!
//! The launcher arm is driven by four motors bolted to the two sides of a
//! single mechanism. Electrically they are four independent controllers;
//! mechanically they are one axis. [`GangedDrive`] is the only type that
//! touches the physical motors: it takes one normalized axis command and
//! fans it out with mirrored sign, `+v` to the left pair and `-v` to the
//! right pair.
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. Platform-specific
//! motor implementations (CAN speed controllers, PWM H-bridges, simulator
//! channels) implement the [`Motor`] trait.

use core::fmt;

/// Error type for motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Speed outside the valid [-1.0, +1.0] range
    InvalidSpeed,
    /// Underlying hardware reported a fault
    HardwareFault,
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::InvalidSpeed => write!(f, "motor speed outside [-1.0, +1.0]"),
            MotorError::HardwareFault => write!(f, "motor hardware fault"),
        }
    }
}

/// Platform-independent motor control interface
pub trait Motor {
    /// Set motor speed
    ///
    /// # Arguments
    ///
    /// * `speed` - Normalized speed in [-1.0, +1.0]
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidSpeed` if `speed` is outside the valid
    /// range, `MotorError::HardwareFault` if the hardware rejects the
    /// command.
    fn set_speed(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Stop the motor (coast)
    fn stop(&mut self) -> Result<(), MotorError>;
}

/// Four motors driven as one mirrored axis.
///
/// A positive axis command drives the left pair forward and the right
/// pair in reverse, matching the mechanical hand of the two sides. All
/// commands are clamped to [-1.0, +1.0] before reaching the motors.
pub struct GangedDrive<M: Motor> {
    left: [M; 2],
    right: [M; 2],
}

impl<M: Motor> GangedDrive<M> {
    /// Create a ganged drive from the two motor pairs.
    pub fn new(left: [M; 2], right: [M; 2]) -> Self {
        Self { left, right }
    }

    /// Drive the whole axis with one normalized command.
    ///
    /// The left pair receives `command`, the right pair `-command`.
    /// Out-of-range commands are clamped, not rejected: the axis must
    /// always accept the arbitration core's output.
    #[inline]
    pub fn set_axis(&mut self, command: f32) -> Result<(), MotorError> {
        let v = command.clamp(-1.0, 1.0);
        for motor in self.left.iter_mut() {
            motor.set_speed(v)?;
        }
        for motor in self.right.iter_mut() {
            motor.set_speed(-v)?;
        }
        Ok(())
    }

    /// Stop all four motors (coast).
    #[inline]
    pub fn stop_all(&mut self) -> Result<(), MotorError> {
        for motor in self.left.iter_mut().chain(self.right.iter_mut()) {
            motor.stop()?;
        }
        Ok(())
    }

    /// Immutable access to a left-pair motor.
    pub fn left(&self, index: usize) -> Option<&M> {
        self.left.get(index)
    }

    /// Immutable access to a right-pair motor.
    pub fn right(&self, index: usize) -> Option<&M> {
        self.right.get(index)
    }
}
