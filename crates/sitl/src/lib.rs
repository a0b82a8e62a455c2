//! catapult_sitl - Software-in-the-loop harness for the catapult launcher
//!
//! Wires the pure control core to a built-in mechanism simulation so the
//! full control loop — sensor read, operator input, mode evaluation,
//! feedback correction, launch sequencing, actuation — runs on host with
//! deterministic lockstep time.

pub mod bridge;
pub mod error;
pub mod feedback;
pub mod rig;

pub use bridge::{BridgeConfig, SimBridge, StepReport};
pub use error::SimError;
pub use feedback::{LoopGains, PositionLoop};
pub use rig::{CatapultRig, RigChannel, RigConfig};
