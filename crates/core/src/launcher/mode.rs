//! Launcher operating modes
//!
//! The mode is a plain operator-selected state: transitions are
//! unconditional assignments with no side effects, and every behavioral
//! difference lives in the per-cycle evaluation table [`hold_command`],
//! which is a pure function of mode, position and calibration. That keeps
//! the whole table exhaustively unit-testable without hardware.

use crate::parameters::LauncherParams;

/// Hold command while Pickup drives the arm down into the pickup band.
pub const PICKUP_HOLD: f32 = -0.1;

/// Hold command while Carry lifts the arm back toward the stow band.
///
/// Asymmetric against [`PICKUP_HOLD`]: Carry works against gravity,
/// Pickup works with it.
pub const CARRY_HOLD: f32 = 0.2;

/// Operating mode of the launcher mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherMode {
    /// Arm released, command held at zero
    #[default]
    Idle,
    /// Operator drives the arm directly
    Manual,
    /// Bang-bang hold at the pickup band
    Pickup,
    /// Bang-bang hold at the carry band
    Carry,
}

impl LauncherMode {
    /// Mode name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            LauncherMode::Idle => "Idle",
            LauncherMode::Manual => "Manual",
            LauncherMode::Pickup => "Pickup",
            LauncherMode::Carry => "Carry",
        }
    }
}

/// Per-cycle mode evaluation.
///
/// Returns the command the mode table wants this cycle, or `None` when
/// the mode issues no command of its own (Manual, where authority belongs
/// to the manual drive path).
///
/// | Mode   | Result                                              |
/// |--------|-----------------------------------------------------|
/// | Idle   | `Some(0.0)`                                         |
/// | Manual | `None`                                              |
/// | Pickup | `Some(PICKUP_HOLD)` while `position < carry_pos`    |
/// | Carry  | `Some(CARRY_HOLD)` while `position > stow_pos`      |
pub fn hold_command(mode: LauncherMode, position: f32, params: &LauncherParams) -> Option<f32> {
    match mode {
        LauncherMode::Idle => Some(0.0),
        LauncherMode::Manual => None,
        LauncherMode::Pickup => {
            if position < params.carry_pos {
                Some(PICKUP_HOLD)
            } else {
                Some(0.0)
            }
        }
        LauncherMode::Carry => {
            if position > params.stow_pos {
                Some(CARRY_HOLD)
            } else {
                Some(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LauncherParams {
        LauncherParams::default() // carry 2.15, stow 1.9
    }

    #[test]
    fn test_idle_always_zero() {
        for position in [0.0, 1.5, 2.0, 2.15, 5.0] {
            assert_eq!(
                hold_command(LauncherMode::Idle, position, &params()),
                Some(0.0)
            );
        }
    }

    #[test]
    fn test_manual_issues_nothing() {
        for position in [0.0, 2.0, 5.0] {
            assert_eq!(hold_command(LauncherMode::Manual, position, &params()), None);
        }
    }

    #[test]
    fn test_pickup_below_carry_threshold() {
        // Scenario: position 1.5, carry threshold 2.15.
        assert_eq!(
            hold_command(LauncherMode::Pickup, 1.5, &params()),
            Some(PICKUP_HOLD)
        );
    }

    #[test]
    fn test_pickup_at_and_past_threshold() {
        assert_eq!(hold_command(LauncherMode::Pickup, 2.15, &params()), Some(0.0));
        assert_eq!(hold_command(LauncherMode::Pickup, 3.0, &params()), Some(0.0));
    }

    #[test]
    fn test_carry_above_stow_threshold() {
        // Scenario: position 2.0, stow threshold 1.9.
        assert_eq!(
            hold_command(LauncherMode::Carry, 2.0, &params()),
            Some(CARRY_HOLD)
        );
    }

    #[test]
    fn test_carry_at_and_below_threshold() {
        assert_eq!(hold_command(LauncherMode::Carry, 1.9, &params()), Some(0.0));
        assert_eq!(hold_command(LauncherMode::Carry, 1.0, &params()), Some(0.0));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(LauncherMode::Idle.name(), "Idle");
        assert_eq!(LauncherMode::Manual.name(), "Manual");
        assert_eq!(LauncherMode::Pickup.name(), "Pickup");
        assert_eq!(LauncherMode::Carry.name(), "Carry");
    }

    #[test]
    fn test_default_mode_is_idle() {
        assert_eq!(LauncherMode::default(), LauncherMode::Idle);
    }
}
