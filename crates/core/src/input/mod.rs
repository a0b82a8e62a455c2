//! Operator control mapping
//!
//! Raw trigger inputs from the launch stick map many-to-one onto mode
//! requests. The mapping is priority-ordered the way the per-cycle button
//! scan resolves it: pickup and carry select first, idle select and the
//! launch trigger override them (a launch always drops the mechanism to
//! Idle first), and the manual nudge buttons override everything — the
//! operator's hands win.
//!
//! The manual nudge is issued every cycle, so releasing the button stops
//! the arm on the next tick rather than latching the last speed.

use crate::launcher::LauncherMode;

/// Manual nudge magnitude while a raise/lower button is held.
pub const MANUAL_NUDGE: f32 = 0.1;

/// Analog channel full scale (volts).
const ANALOG_FULL_SCALE: f32 = 5.0;

/// Launch power band mapped from the analog channel.
const LAUNCH_SPEED_MIN: f32 = 0.5;
const LAUNCH_SPEED_MAX: f32 = 1.0;

/// Scale the 0-5 V launch-power analog input onto the launch band.
///
/// Full scale maps linearly onto [0.5, 1.0]; readings outside 0-5 V are
/// clamped. The lower bound keeps a mis-set dial from commanding a throw
/// too weak to clear the mechanism.
pub fn scale_launch_axis(raw: f32) -> f32 {
    let clamped = raw.clamp(0.0, ANALOG_FULL_SCALE);
    let range = LAUNCH_SPEED_MAX - LAUNCH_SPEED_MIN;
    (clamped / ANALOG_FULL_SCALE) * range + LAUNCH_SPEED_MIN
}

/// Snapshot of the operator's launcher controls for one cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorInput {
    /// Select Pickup mode
    pub pickup_select: bool,
    /// Select Carry mode
    pub carry_select: bool,
    /// Select Idle mode
    pub idle_select: bool,
    /// Fire the timed launch pulse
    pub launch_trigger: bool,
    /// Manual nudge upward
    pub manual_raise: bool,
    /// Manual nudge downward
    pub manual_lower: bool,
    /// Raw launch-power analog reading (0-5 V)
    pub launch_axis_raw: f32,
}

impl OperatorInput {
    /// Mode requested by this cycle's buttons, if any.
    ///
    /// Later entries override earlier ones: manual beats idle/launch
    /// beats carry beats pickup. `None` when no mode button is held.
    pub fn requested_mode(&self) -> Option<LauncherMode> {
        let mut requested = None;
        if self.pickup_select {
            requested = Some(LauncherMode::Pickup);
        }
        if self.carry_select {
            requested = Some(LauncherMode::Carry);
        }
        if self.idle_select || self.launch_trigger {
            requested = Some(LauncherMode::Idle);
        }
        if self.manual_raise || self.manual_lower {
            requested = Some(LauncherMode::Manual);
        }
        requested
    }

    /// True when the launch pulse should fire this cycle.
    pub fn launch_requested(&self) -> bool {
        self.launch_trigger
    }

    /// Manual drive speed for this cycle.
    ///
    /// Raise wins over lower if both are held; zero with neither, so the
    /// manual path actively stops the arm when the buttons are released.
    pub fn manual_speed(&self) -> f32 {
        if self.manual_raise {
            MANUAL_NUDGE
        } else if self.manual_lower {
            -MANUAL_NUDGE
        } else {
            0.0
        }
    }

    /// Scaled launch speed from the analog channel.
    pub fn launch_speed(&self) -> f32 {
        scale_launch_axis(self.launch_axis_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_buttons_no_request() {
        let input = OperatorInput::default();
        assert_eq!(input.requested_mode(), None);
        assert!(!input.launch_requested());
        assert_eq!(input.manual_speed(), 0.0);
    }

    #[test]
    fn test_single_selects() {
        let input = OperatorInput {
            pickup_select: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Pickup));

        let input = OperatorInput {
            carry_select: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Carry));

        let input = OperatorInput {
            idle_select: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Idle));
    }

    #[test]
    fn test_idle_overrides_holds() {
        let input = OperatorInput {
            pickup_select: true,
            carry_select: true,
            idle_select: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Idle));
    }

    #[test]
    fn test_launch_forces_idle() {
        let input = OperatorInput {
            carry_select: true,
            launch_trigger: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Idle));
        assert!(input.launch_requested());
    }

    #[test]
    fn test_manual_wins_over_everything() {
        let input = OperatorInput {
            pickup_select: true,
            idle_select: true,
            manual_lower: true,
            ..Default::default()
        };
        assert_eq!(input.requested_mode(), Some(LauncherMode::Manual));
        assert_eq!(input.manual_speed(), -MANUAL_NUDGE);
    }

    #[test]
    fn test_manual_raise_wins_over_lower() {
        let input = OperatorInput {
            manual_raise: true,
            manual_lower: true,
            ..Default::default()
        };
        assert_eq!(input.manual_speed(), MANUAL_NUDGE);
    }

    #[test]
    fn test_scale_launch_axis_band() {
        assert!((scale_launch_axis(0.0) - 0.5).abs() < 0.001);
        assert!((scale_launch_axis(2.5) - 0.75).abs() < 0.001);
        assert!((scale_launch_axis(5.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_launch_axis_clamps() {
        assert!((scale_launch_axis(-1.0) - 0.5).abs() < 0.001);
        assert!((scale_launch_axis(9.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_launch_speed_uses_axis() {
        let input = OperatorInput {
            launch_axis_raw: 5.0,
            ..Default::default()
        };
        assert!((input.launch_speed() - 1.0).abs() < 0.001);
    }
}
