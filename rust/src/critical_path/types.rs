//! Types for critical path calculation.

use pyo3::prelude::*;

/// Per-task timing information, in time units from project start.
///
/// Signed so that a defective pass shows up as negative slack instead of
/// wrapping.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    #[pyo3(get)]
    pub earliest_start: i64,
    /// Earliest possible finish time (from forward pass).
    #[pyo3(get)]
    pub earliest_finish: i64,
    /// Latest allowable start time (from backward pass).
    #[pyo3(get)]
    pub latest_start: i64,
    /// Latest allowable finish time (from backward pass).
    #[pyo3(get)]
    pub latest_finish: i64,
    /// Slack = latest_start - earliest_start.
    #[pyo3(get)]
    pub slack: i64,
}

impl TaskTiming {
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }
}

#[pymethods]
impl TaskTiming {
    #[getter(is_critical)]
    fn critical(&self) -> bool {
        self.is_critical()
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_timing_critical() {
        let timing = TaskTiming {
            earliest_start: 0,
            earliest_finish: 5,
            latest_start: 0,
            latest_finish: 5,
            slack: 0,
        };
        assert!(timing.is_critical());

        let timing_with_slack = TaskTiming {
            earliest_start: 0,
            earliest_finish: 5,
            latest_start: 2,
            latest_finish: 7,
            slack: 2,
        };
        assert!(!timing_with_slack.is_critical());
    }
}
