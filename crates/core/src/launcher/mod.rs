//! Launcher mechanism control
//!
//! The mode state machine, the tick-driven launch sequence, and the
//! arbitration controller that owns the only path to the actuator.
//!
//! # Contents
//!
//! - [`LauncherMode`] and the pure per-cycle evaluation [`hold_command`]
//! - [`LaunchSequence`]: timed one-shot pulse with re-entrancy guard
//! - [`LauncherController`]: arbitration core and emission funnel
//! - [`CorrectionSink`]: seam for the external closed-loop controller

mod controller;
mod mode;
mod sequence;

pub use controller::{CorrectionSink, LauncherController, LauncherError};
pub use mode::{hold_command, LauncherMode, CARRY_HOLD, PICKUP_HOLD};
pub use sequence::{LaunchError, LaunchSequence, LaunchState, LaunchTick, MAX_LAUNCH_US};
