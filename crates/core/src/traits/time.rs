//! Time abstraction for platform-agnostic control-loop timing.
//!
//! The `TimeSource` trait abstracts over different time providers so the
//! launcher logic can be driven by a hardware timer on target and by a
//! controllable clock in host tests and simulation.

use core::cell::Cell;

/// Platform-agnostic time source for control loops and timing.
///
/// # Example
///
/// ```
/// use catapult_core::traits::{MockTime, TimeSource};
///
/// fn due_for_update<T: TimeSource>(time: &T, last_update_us: u64) -> bool {
///     time.elapsed_since(last_update_us) >= 5_000 // 200 Hz tick
/// }
///
/// let time = MockTime::new();
/// time.advance(5_000);
/// assert!(due_for_update(&time, 0));
/// ```
pub trait TimeSource: Clone {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Mock time source with explicitly advanced time.
///
/// Tests and the SITL bridge own time progression, which makes
/// timing-dependent code (the launch sequence in particular) fully
/// deterministic.
///
/// # Example
///
/// ```
/// use catapult_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_us(), 0);
///
/// time.advance(1_000);
/// assert_eq!(time.now_us(), 1_000);
/// assert_eq!(time.now_ms(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Create a mock clock starting at zero.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Advance time by the given number of microseconds.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get().saturating_add(us));
    }

    /// Set the absolute time in microseconds.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1_000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_time_starts_at_zero() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn test_mock_time_advance() {
        let time = MockTime::new();
        time.advance(1_500);
        assert_eq!(time.now_us(), 1_500);
        assert_eq!(time.now_ms(), 1);

        time.advance(500);
        assert_eq!(time.now_us(), 2_000);
        assert_eq!(time.now_ms(), 2);
    }

    #[test]
    fn test_mock_time_set() {
        let time = MockTime::new();
        time.set(42_000);
        assert_eq!(time.now_us(), 42_000);
    }

    #[test]
    fn test_elapsed_since() {
        let time = MockTime::new();
        time.set(10_000);
        assert_eq!(time.elapsed_since(4_000), 6_000);
        // Reference in the future saturates to zero.
        assert_eq!(time.elapsed_since(20_000), 0);
    }

    #[test]
    fn test_clone_shares_no_state() {
        let time = MockTime::new();
        let clone = time.clone();
        time.advance(1_000);
        assert_eq!(clone.now_us(), 0);
    }
}
