//! Scheduling pipeline: topology check, sequencing, both passes, extraction.

use crate::config::ScheduleConfig;
use crate::critical_path::{
    backward_pass, canonical_critical_path, compute_slack, forward_pass, TaskTiming,
};
use crate::error::PertError;
use crate::models::Task;
use crate::sequencer::{depth_levels, topological_order, DepthLevels};
use crate::{log_changes, log_checks, log_debug};

/// Computed fields of a scheduled network, indexed by arena slot.
///
/// Built in one piece by [`compute_schedule`]; a failed run produces no
/// `Schedule` at all, so partial results are never observable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub source: usize,
    pub sink: usize,
    /// Forward topological order (reverse it for the backward order).
    pub order: Vec<usize>,
    pub timings: Vec<TaskTiming>,
    pub levels: DepthLevels,
    /// Canonical critical path, source to sink.
    pub critical_path: Vec<usize>,
    pub project_duration: i64,
}

/// Locate the single source and single sink.
///
/// # Returns
/// * `Ok((source, sink))` as arena slots
/// * `Err(PertError::InvalidTopology)` unless exactly one of each exists
pub fn find_endpoints(tasks: &[Task]) -> Result<(usize, usize), PertError> {
    let sources: Vec<usize> = (0..tasks.len()).filter(|&s| tasks[s].is_source()).collect();
    let sinks: Vec<usize> = (0..tasks.len()).filter(|&s| tasks[s].is_sink()).collect();

    match (sources.as_slice(), sinks.as_slice()) {
        ([source], [sink]) => Ok((*source, *sink)),
        _ => Err(PertError::InvalidTopology {
            sources: sources.len(),
            sinks: sinks.len(),
        }),
    }
}

/// Run the full scheduling pipeline over an arena of tasks.
pub fn compute_schedule(tasks: &[Task], config: &ScheduleConfig) -> Result<Schedule, PertError> {
    let verbosity = config.verbosity;

    let (source, sink) = find_endpoints(tasks)?;
    log_checks!(
        verbosity,
        "[schedule] {} tasks, source={}, sink={}",
        tasks.len(),
        tasks[source].id,
        tasks[sink].id
    );

    let order = topological_order(tasks)?;
    log_checks!(
        verbosity,
        "[schedule] topological order: {:?}",
        order.iter().map(|&slot| tasks[slot].id).collect::<Vec<_>>()
    );

    let mut timings = forward_pass(tasks, &order);
    let project_duration = backward_pass(tasks, &order, &mut timings, sink);
    compute_slack(tasks, &mut timings)?;

    for &slot in &order {
        let t = &timings[slot];
        log_debug!(
            verbosity,
            "[schedule] task {}: es={} ef={} ls={} lf={} slack={}",
            tasks[slot].id,
            t.earliest_start,
            t.earliest_finish,
            t.latest_start,
            t.latest_finish,
            t.slack
        );
    }

    let critical_path = canonical_critical_path(tasks, &timings, source, sink)?;
    let levels = depth_levels(tasks, &order);

    log_changes!(
        verbosity,
        "[schedule] project duration {}, critical path {:?}",
        project_duration,
        critical_path.iter().map(|&slot| tasks[slot].id).collect::<Vec<_>>()
    );

    Ok(Schedule {
        source,
        sink,
        order,
        timings,
        levels,
        critical_path,
        project_duration,
    })
}
