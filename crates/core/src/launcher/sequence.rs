//! Timed launch sequence
//!
//! The launch throw is a one-shot timed pulse: full command for a few
//! hundred milliseconds, then stop. Instead of suspending the control
//! loop for the pulse duration, the sequence is an explicit timed state
//! advanced by the loop's own tick. The feedback-lockout flag is this
//! state itself, so an interrupted launch can never strand a separate
//! boolean in the locked position.

use core::fmt;

/// Hard ceiling on a launch pulse (microseconds).
///
/// A duration above this is a misconfiguration, not a long throw.
pub const MAX_LAUNCH_US: u64 = 2_000_000;

/// Launch sequence state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchState {
    /// No launch running; feedback path armed
    Inactive,
    /// Launch pulse in progress; all other actuator writes locked out
    Active {
        /// Commanded throw speed (positive magnitude)
        speed: f32,
        /// Remaining pulse time in microseconds
        remaining_us: u64,
    },
}

/// Errors from starting a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchError {
    /// A sequence is already running; launches never stack
    AlreadyActive,
    /// Duration is zero or above [`MAX_LAUNCH_US`]
    InvalidDuration,
    /// Speed is not a positive magnitude in (0.0, 1.0]
    InvalidSpeed,
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::AlreadyActive => write!(f, "launch sequence already active"),
            LaunchError::InvalidDuration => write!(f, "launch duration out of range"),
            LaunchError::InvalidSpeed => write!(f, "launch speed must be in (0.0, 1.0]"),
        }
    }
}

/// Result of advancing the sequence by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaunchTick {
    /// No sequence running
    Idle,
    /// Pulse still in progress
    Running {
        /// Remaining pulse time after this tick
        remaining_us: u64,
    },
    /// Pulse duration elapsed on this tick (reported exactly once)
    Finished,
}

/// Tick-driven one-shot launch sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchSequence {
    state: Option<ActiveLaunch>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveLaunch {
    speed: f32,
    remaining_us: u64,
}

impl LaunchSequence {
    /// Create an inactive sequence.
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Begin a launch pulse.
    ///
    /// # Arguments
    ///
    /// * `speed` - Throw speed magnitude in (0.0, 1.0]
    /// * `duration_us` - Pulse length in microseconds
    ///
    /// # Errors
    ///
    /// Rejects re-entrant starts while a pulse is running, non-positive
    /// or out-of-range speeds, and zero or overlong durations. A rejected
    /// start leaves any running sequence untouched.
    pub fn start(&mut self, speed: f32, duration_us: u64) -> Result<(), LaunchError> {
        if self.state.is_some() {
            return Err(LaunchError::AlreadyActive);
        }
        if !(speed > 0.0 && speed <= 1.0) {
            return Err(LaunchError::InvalidSpeed);
        }
        if duration_us == 0 || duration_us > MAX_LAUNCH_US {
            return Err(LaunchError::InvalidDuration);
        }

        self.state = Some(ActiveLaunch {
            speed,
            remaining_us: duration_us,
        });
        Ok(())
    }

    /// Advance the sequence by `dt_us` microseconds.
    ///
    /// Returns [`LaunchTick::Finished`] exactly once, on the first tick
    /// whose cumulative time reaches the pulse duration.
    pub fn tick(&mut self, dt_us: u64) -> LaunchTick {
        match self.state.as_mut() {
            None => LaunchTick::Idle,
            Some(active) => {
                active.remaining_us = active.remaining_us.saturating_sub(dt_us);
                if active.remaining_us == 0 {
                    self.state = None;
                    LaunchTick::Finished
                } else {
                    LaunchTick::Running {
                        remaining_us: active.remaining_us,
                    }
                }
            }
        }
    }

    /// Cancel a running sequence.
    ///
    /// Returns true if a sequence was active. Always leaves the sequence
    /// inactive, re-arming the feedback path.
    pub fn abort(&mut self) -> bool {
        self.state.take().is_some()
    }

    /// True while a pulse is in progress.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Current state snapshot.
    pub fn state(&self) -> LaunchState {
        match self.state {
            None => LaunchState::Inactive,
            Some(ActiveLaunch {
                speed,
                remaining_us,
            }) => LaunchState::Active {
                speed,
                remaining_us,
            },
        }
    }

    /// Commanded speed of the running pulse, if any.
    pub fn active_speed(&self) -> Option<f32> {
        self.state.map(|active| active.speed)
    }
}
