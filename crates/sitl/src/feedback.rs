//! External closed-loop position controller.
//!
//! Stands in for the hardware position loop that runs alongside the
//! operator code: a PI controller from potentiometer error to a
//! correction value, recomputed every control cycle and pushed into the
//! core through its `CorrectionSink` seam.
//!
//! The loop's output polarity is opposite the mechanism's forward
//! convention — the core inverts the sign on the way through, so a
//! positive correction (arm below setpoint) ends up as the negative
//! actuator command that raises the arm.

/// Gains for the position loop.
#[derive(Debug, Clone, Copy)]
pub struct LoopGains {
    /// Proportional gain, command per volt of error.
    pub kp: f32,
    /// Integral gain, command per volt-second of error.
    pub ki: f32,
    /// Symmetric clamp on the integrator contribution.
    pub integrator_limit: f32,
}

impl Default for LoopGains {
    fn default() -> Self {
        Self {
            kp: 2.0,
            ki: 0.2,
            integrator_limit: 0.3,
        }
    }
}

/// PI position loop producing per-cycle corrections.
pub struct PositionLoop {
    gains: LoopGains,
    setpoint_v: f32,
    integrator: f32,
}

impl PositionLoop {
    /// Create a loop holding the given setpoint.
    pub fn new(gains: LoopGains, setpoint_v: f32) -> Self {
        Self {
            gains,
            setpoint_v,
            integrator: 0.0,
        }
    }

    /// Change the position setpoint. Clears the integrator.
    pub fn set_setpoint(&mut self, setpoint_v: f32) {
        self.setpoint_v = setpoint_v;
        self.reset();
    }

    /// Current setpoint (volts).
    pub fn setpoint(&self) -> f32 {
        self.setpoint_v
    }

    /// Clear accumulated state. Call on mode or target change.
    pub fn reset(&mut self) {
        self.integrator = 0.0;
    }

    /// Compute the correction for one cycle.
    ///
    /// Returns a value in [-1.0, 1.0]; positive when the arm is below
    /// the setpoint.
    pub fn update(&mut self, position_v: f32, dt_s: f32) -> f32 {
        let error = self.setpoint_v - position_v;

        self.integrator = (self.integrator + error * self.gains.ki * dt_s)
            .clamp(-self.gains.integrator_limit, self.gains.integrator_limit);

        (error * self.gains.kp + self.integrator).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_sign_follows_error() {
        let mut pid = PositionLoop::new(LoopGains::default(), 2.0);

        // Arm below setpoint: positive correction.
        assert!(pid.update(1.5, 0.005) > 0.0);
        // Arm above setpoint: negative correction.
        pid.reset();
        assert!(pid.update(2.5, 0.005) < 0.0);
    }

    #[test]
    fn test_correction_zero_at_setpoint() {
        let mut pid = PositionLoop::new(LoopGains::default(), 2.0);
        assert_eq!(pid.update(2.0, 0.005), 0.0);
    }

    #[test]
    fn test_correction_clamped() {
        let mut pid = PositionLoop::new(LoopGains::default(), 4.5);
        assert_eq!(pid.update(0.5, 0.005), 1.0);
    }

    #[test]
    fn test_integrator_clamped() {
        let gains = LoopGains {
            kp: 0.0,
            ki: 10.0,
            integrator_limit: 0.1,
        };
        let mut pid = PositionLoop::new(gains, 3.0);
        for _ in 0..1_000 {
            pid.update(1.0, 0.005);
        }
        assert!(pid.update(1.0, 0.005) <= 0.1 + 1e-6);
    }

    #[test]
    fn test_set_setpoint_clears_integrator() {
        let mut pid = PositionLoop::new(LoopGains::default(), 3.0);
        for _ in 0..100 {
            pid.update(1.0, 0.005);
        }
        pid.set_setpoint(1.0);
        // Fresh integrator: pure proportional response at the new target.
        assert_eq!(pid.update(1.0, 0.005), 0.0);
    }
}
