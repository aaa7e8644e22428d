//! Core data types for the activity network.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::index::TaskId;

/// Progress of a task. Tracking only; scheduling never reads it.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Upstream tasks need to be finished first.
    Locked,
    #[default]
    NotStarted,
    InProgress,
    /// Work is done and under review.
    Verifying,
    /// Done and verified; downstream tasks may start.
    Finished,
}

impl TaskStatus {
    /// The status that follows this one, `None` once finished.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Locked => Some(Self::NotStarted),
            Self::NotStarted => Some(Self::InProgress),
            Self::InProgress => Some(Self::Verifying),
            Self::Verifying => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Verifying => "verifying",
            Self::Finished => "finished",
        }
    }
}

#[pymethods]
impl TaskStatus {
    fn __str__(&self) -> &'static str {
        self.label()
    }
}

/// An activity stored in the network arena.
///
/// Edge lists hold arena slots in declaration order. They are only written by
/// the network so that the predecessor/successor relation stays mutual.
#[derive(Clone, Debug)]
pub struct Task {
    pub id: TaskId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: u32,
    pub status: TaskStatus,
    pub(crate) predecessors: Vec<usize>,
    pub(crate) successors: Vec<usize>,
}

impl Task {
    pub fn new(id: TaskId, duration: u32) -> Self {
        Self {
            id,
            name: None,
            description: None,
            duration,
            status: TaskStatus::default(),
            predecessors: Vec::new(),
            successors: Vec::new(),
        }
    }

    pub fn predecessors(&self) -> &[usize] {
        &self.predecessors
    }

    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    #[inline]
    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }

    #[inline]
    pub fn is_sink(&self) -> bool {
        self.successors.is_empty()
    }
}

/// A task placed on the calendar.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    #[pyo3(get, set)]
    pub task_id: TaskId,
    #[pyo3(get, set)]
    pub name: Option<String>,
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    #[pyo3(get, set)]
    pub end_date: NaiveDate,
    #[pyo3(get, set)]
    pub duration_days: u32,
    #[pyo3(get, set)]
    pub is_critical: bool,
}

#[pymethods]
impl ScheduledTask {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(task_id={}, start={}, end={}, critical={})",
            self.task_id, self.start_date, self.end_date, self.is_critical
        )
    }
}
