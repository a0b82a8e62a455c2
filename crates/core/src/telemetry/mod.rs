//! Write-only telemetry sink
//!
//! The launcher publishes its emitted command and loaded tuning values
//! for dashboard observability. Telemetry is strictly write-only: nothing
//! published here feeds back into control decisions.

use heapless::FnvIndexMap;

/// Well-known telemetry keys.
pub mod keys {
    /// Last normalized command written to the ganged drive.
    pub const COMMAND: &str = "CATA_CMD";
    /// Potentiometer position reading at the last mode evaluation.
    pub const POSITION: &str = "CATA_POS";
    /// Loaded carry-position threshold (sensor volts).
    pub const CARRY_POS: &str = "CATA_CARRY_POS";
    /// Loaded stow-position threshold (sensor volts).
    pub const STOW_POS: &str = "CATA_STOW_POS";
    /// Loaded launch pulse duration (seconds).
    pub const LAUNCH_TIME: &str = "CATA_LAUNCH_TIME";
    /// Scaled launch speed from the operator analog channel.
    pub const LAUNCH_SPEED: &str = "CATA_LAUNCH_SPD";
}

/// Sink for named scalar telemetry values.
pub trait TelemetrySink {
    /// Publish a value under a well-known key.
    fn publish(&mut self, key: &'static str, value: f32);
}

/// No-op sink for wiring without a dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn publish(&mut self, _key: &'static str, _value: f32) {}
}

/// Capacity of the recording sink (power of two, index-map requirement).
const RECORD_CAPACITY: usize = 16;

/// Last-value-wins recording sink.
///
/// Keeps the most recent value per key in a bounded map. Used by tests
/// and the SITL bridge as a stand-in dashboard.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    values: FnvIndexMap<&'static str, f32, RECORD_CAPACITY>,
}

impl RecordingTelemetry {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
        }
    }

    /// Last value published under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn publish(&mut self, key: &'static str, value: f32) {
        // Drop on overflow: observability must never fault the control path.
        let _ = self.values.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_last_value_wins() {
        let mut sink = RecordingTelemetry::new();
        sink.publish(keys::COMMAND, 0.5);
        sink.publish(keys::COMMAND, -0.1);

        assert_eq!(sink.get(keys::COMMAND), Some(-0.1));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_recording_missing_key() {
        let sink = RecordingTelemetry::new();
        assert!(sink.is_empty());
        assert_eq!(sink.get(keys::POSITION), None);
    }

    #[test]
    fn test_null_sink_discards() {
        let mut sink = NullTelemetry;
        sink.publish(keys::COMMAND, 1.0);
    }
}
