//! Rust implementation of the PERT/CPM scheduling engine.
//!
//! Builds an activity network, runs the forward and backward passes in
//! topological order, extracts slack and a canonical critical path, and
//! assigns a linear render order for Gantt charts.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod calendar;
mod config;
pub mod critical_path;
mod error;
mod index;
pub mod logging;
mod models;
mod network;
pub mod render;
mod schedule;
pub mod sequencer;

pub use config::ScheduleConfig;
pub use critical_path::TaskTiming;
pub use error::PertError;
pub use index::{TaskId, TaskIndex};
pub use models::{ScheduledTask, Task, TaskStatus};
pub use network::Network;
pub use render::{GanttBar, GanttView};
pub use schedule::{compute_schedule, find_endpoints, Schedule};

fn to_py_err(err: PertError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Activity network (PyO3 wrapper).
///
/// Every method raises `ValueError` where the Rust API returns an error.
#[pyclass(name = "Network")]
#[derive(Clone, Debug)]
pub struct PyNetwork {
    inner: Network,
}

#[pymethods]
impl PyNetwork {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<ScheduleConfig>) -> Self {
        Self {
            inner: Network::with_config(config.unwrap_or_default()),
        }
    }

    #[pyo3(signature = (id, duration, name=None, description=None))]
    fn add_task(
        &mut self,
        id: TaskId,
        duration: u32,
        name: Option<String>,
        description: Option<String>,
    ) -> PyResult<()> {
        self.inner.add_task(id, duration).map_err(to_py_err)?;
        if let Some(name) = name {
            self.inner.set_name(id, name).map_err(to_py_err)?;
        }
        if let Some(description) = description {
            self.inner
                .set_description(id, description)
                .map_err(to_py_err)?;
        }
        Ok(())
    }

    fn set_name(&mut self, id: TaskId, name: String) -> PyResult<()> {
        self.inner.set_name(id, name).map_err(to_py_err)
    }

    fn set_description(&mut self, id: TaskId, description: String) -> PyResult<()> {
        self.inner.set_description(id, description).map_err(to_py_err)
    }

    /// Add `pred_id -> succ_id`, optionally at `index` in the predecessor
    /// list of `succ_id`.
    #[pyo3(signature = (pred_id, succ_id, index=None))]
    fn add_dependency(
        &mut self,
        pred_id: TaskId,
        succ_id: TaskId,
        index: Option<usize>,
    ) -> PyResult<()> {
        let result = match index {
            Some(index) => self.inner.add_dependency_at(pred_id, succ_id, index),
            None => self.inner.add_dependency(pred_id, succ_id),
        };
        result.map_err(to_py_err)
    }

    fn replace_dependency(
        &mut self,
        succ_id: TaskId,
        old_pred_id: TaskId,
        new_pred_id: TaskId,
    ) -> PyResult<bool> {
        self.inner
            .replace_dependency(succ_id, old_pred_id, new_pred_id)
            .map_err(to_py_err)
    }

    fn remove_dependency(&mut self, pred_id: TaskId, succ_id: TaskId) -> PyResult<bool> {
        self.inner
            .remove_dependency(pred_id, succ_id)
            .map_err(to_py_err)
    }

    fn predecessors(&self, id: TaskId) -> PyResult<Vec<TaskId>> {
        self.inner.predecessors(id).map_err(to_py_err)
    }

    fn successors(&self, id: TaskId) -> PyResult<Vec<TaskId>> {
        self.inner.successors(id).map_err(to_py_err)
    }

    fn schedule(&mut self) -> PyResult<()> {
        self.inner.schedule().map_err(to_py_err)
    }

    fn linearize(&mut self) -> PyResult<()> {
        self.inner.linearize().map_err(to_py_err)
    }

    fn timing(&self, id: TaskId) -> PyResult<TaskTiming> {
        self.inner.timing(id).map_err(to_py_err)
    }

    fn earliest_start(&self, id: TaskId) -> PyResult<i64> {
        self.inner.earliest_start(id).map_err(to_py_err)
    }

    fn earliest_finish(&self, id: TaskId) -> PyResult<i64> {
        self.inner.earliest_finish(id).map_err(to_py_err)
    }

    fn latest_start(&self, id: TaskId) -> PyResult<i64> {
        self.inner.latest_start(id).map_err(to_py_err)
    }

    fn latest_finish(&self, id: TaskId) -> PyResult<i64> {
        self.inner.latest_finish(id).map_err(to_py_err)
    }

    fn slack(&self, id: TaskId) -> PyResult<i64> {
        self.inner.slack(id).map_err(to_py_err)
    }

    fn is_critical(&self, id: TaskId) -> PyResult<bool> {
        self.inner.is_critical(id).map_err(to_py_err)
    }

    fn render_index(&self, id: TaskId) -> PyResult<u32> {
        self.inner.render_index(id).map_err(to_py_err)
    }

    fn render_order(&self) -> PyResult<Vec<TaskId>> {
        self.inner.render_order().map_err(to_py_err)
    }

    fn critical_path(&self) -> PyResult<Vec<TaskId>> {
        self.inner.critical_path().map_err(to_py_err)
    }

    fn project_duration(&self) -> PyResult<i64> {
        self.inner.project_duration().map_err(to_py_err)
    }

    fn topological_order(&self) -> PyResult<Vec<TaskId>> {
        self.inner.topological_order().map_err(to_py_err)
    }

    fn source(&self) -> PyResult<TaskId> {
        self.inner.source().map_err(to_py_err)
    }

    fn sink(&self) -> PyResult<TaskId> {
        self.inner.sink().map_err(to_py_err)
    }

    fn upstream_depth(&self, id: TaskId) -> PyResult<u32> {
        self.inner.upstream_depth(id).map_err(to_py_err)
    }

    fn downstream_depth(&self, id: TaskId) -> PyResult<u32> {
        self.inner.downstream_depth(id).map_err(to_py_err)
    }

    fn layers(&self) -> PyResult<Vec<Vec<TaskId>>> {
        self.inner.layers().map_err(to_py_err)
    }

    #[pyo3(signature = (view=GanttView::Earliest))]
    fn gantt_bars(&self, view: GanttView) -> PyResult<Vec<GanttBar>> {
        self.inner.gantt_bars(view).map_err(to_py_err)
    }

    /// Calendar dates for every task, one time unit per day.
    #[pyo3(signature = (project_start, view=GanttView::Earliest))]
    fn dated_schedule(
        &self,
        project_start: NaiveDate,
        view: GanttView,
    ) -> PyResult<Vec<ScheduledTask>> {
        self.inner
            .dated_schedule(project_start, view)
            .map_err(to_py_err)
    }

    fn status(&self, id: TaskId) -> PyResult<TaskStatus> {
        self.inner.status(id).map_err(to_py_err)
    }

    fn set_status(&mut self, id: TaskId, status: TaskStatus) -> PyResult<()> {
        self.inner.set_status(id, status).map_err(to_py_err)
    }

    fn advance_status(&mut self, id: TaskId) -> PyResult<TaskStatus> {
        self.inner.advance_status(id).map_err(to_py_err)
    }

    fn ready_tasks(&self) -> Vec<TaskId> {
        self.inner.ready_tasks()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Network(tasks={}, scheduled={}, linearized={})",
            self.inner.len(),
            self.inner.is_scheduled(),
            self.inner.is_linearized()
        )
    }
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<PyNetwork>()?;
    m.add_class::<TaskStatus>()?;
    m.add_class::<ScheduledTask>()?;
    m.add_class::<TaskTiming>()?;
    m.add_class::<GanttBar>()?;
    m.add_class::<GanttView>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;

    Ok(())
}
