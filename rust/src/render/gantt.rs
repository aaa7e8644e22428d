//! Gantt bar projection of a scheduled, linearized network.

use pyo3::prelude::*;

use crate::critical_path::TaskTiming;
use crate::index::TaskId;
use crate::models::Task;

/// Which pair of times a chart draws.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GanttView {
    /// Every task as early as possible.
    Earliest,
    /// Every task as late as possible without delaying the project.
    Latest,
}

impl GanttView {
    /// Start time of a task in this view.
    pub fn start(self, timing: &TaskTiming) -> i64 {
        match self {
            GanttView::Earliest => timing.earliest_start,
            GanttView::Latest => timing.latest_start,
        }
    }
}

/// One row of a Gantt chart.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttBar {
    #[pyo3(get)]
    pub task_id: TaskId,
    #[pyo3(get)]
    pub name: Option<String>,
    #[pyo3(get)]
    pub render_index: u32,
    #[pyo3(get)]
    pub start: i64,
    #[pyo3(get)]
    pub finish: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl GanttBar {
    fn __repr__(&self) -> String {
        format!(
            "GanttBar(task_id={}, row={}, start={}, finish={})",
            self.task_id, self.render_index, self.start, self.finish
        )
    }
}

/// Build one bar per task, ordered by render index.
pub fn gantt_bars(
    tasks: &[Task],
    timings: &[TaskTiming],
    render_indices: &[u32],
    view: GanttView,
) -> Vec<GanttBar> {
    let mut bars: Vec<GanttBar> = tasks
        .iter()
        .zip(timings)
        .zip(render_indices)
        .map(|((task, timing), &render_index)| {
            let start = view.start(timing);
            GanttBar {
                task_id: task.id,
                name: task.name.clone(),
                render_index,
                start,
                finish: start + i64::from(task.duration),
                is_critical: timing.is_critical(),
            }
        })
        .collect();
    bars.sort_by_key(|bar| bar.render_index);
    bars
}
