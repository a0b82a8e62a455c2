//! Control-task metadata and runtime statistics
//!
//! Bookkeeping for the fixed-period control loop: a task's configured
//! rate and budget, and the runtime statistics the loop harness keeps
//! while driving it.

/// Task metadata registered at compile time
#[derive(Debug, Clone, Copy)]
pub struct TaskMetadata {
    /// Human-readable task name for logging and debugging
    pub name: &'static str,
    /// Target execution rate in Hz
    pub rate_hz: u32,
    /// Execution time budget in microseconds
    ///
    /// Should be less than the task period to leave scheduling margin.
    pub budget_us: u32,
}

impl TaskMetadata {
    /// Task period in microseconds derived from the rate
    #[inline]
    pub const fn period_us(&self) -> u32 {
        1_000_000 / self.rate_hz
    }

    /// Check if an execution time is within budget
    #[inline]
    pub const fn is_within_budget(&self, execution_us: u32) -> bool {
        execution_us <= self.budget_us
    }
}

/// Runtime statistics for a single task
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskStats {
    /// Last execution time in microseconds
    pub last_execution_us: u32,
    /// Average execution time in microseconds (exponential moving average)
    pub avg_execution_us: u32,
    /// Maximum execution time observed in microseconds
    pub max_execution_us: u32,
    /// Number of deadline misses (execution time > budget)
    pub deadline_misses: u32,
    /// Total number of executions
    pub execution_count: u64,
}

impl TaskStats {
    /// Update statistics with a new execution measurement
    pub fn update(&mut self, execution_us: u32, budget_us: u32) {
        self.last_execution_us = execution_us;
        self.execution_count = self.execution_count.saturating_add(1);

        // EMA with alpha = 0.1 in fixed point: avg = (value + 9 * avg) / 10
        if self.avg_execution_us == 0 {
            self.avg_execution_us = execution_us;
        } else {
            self.avg_execution_us = (execution_us + 9 * self.avg_execution_us) / 10;
        }

        if execution_us > self.max_execution_us {
            self.max_execution_us = execution_us;
        }

        if execution_us > budget_us {
            self.deadline_misses = self.deadline_misses.saturating_add(1);
        }
    }
}
