//! Forward and backward passes over a topological order.

use crate::models::Task;

use super::types::TaskTiming;

/// Forward pass: compute earliest start/finish for every slot.
///
/// `order` must be a forward topological order of `tasks`, so every
/// predecessor's finish time is final before any successor reads it.
/// Latest times and slack are left at zero for the backward pass.
pub fn forward_pass(tasks: &[Task], order: &[usize]) -> Vec<TaskTiming> {
    let mut timings = vec![TaskTiming::default(); tasks.len()];

    for &slot in order {
        let task = &tasks[slot];

        // Earliest start = max of all predecessor finish times
        let earliest_start = task
            .predecessors()
            .iter()
            .map(|&pred| timings[pred].earliest_finish)
            .max()
            .unwrap_or(0);

        let timing = &mut timings[slot];
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start + i64::from(task.duration);
    }

    timings
}

/// Backward pass: compute latest start/finish for every slot.
///
/// The sink's earliest finish is the schedule horizon. Every other task
/// finishes no later than the earliest latest-start among its successors.
/// Slots are visited in reverse topological order.
///
/// # Returns
/// The project duration (the sink's earliest finish).
pub fn backward_pass(
    tasks: &[Task],
    order: &[usize],
    timings: &mut [TaskTiming],
    sink: usize,
) -> i64 {
    let project_duration = timings[sink].earliest_finish;

    for &slot in order.iter().rev() {
        let task = &tasks[slot];

        let latest_finish = if slot == sink {
            project_duration
        } else {
            task.successors()
                .iter()
                .map(|&succ| timings[succ].latest_start)
                .min()
                .unwrap_or(project_duration)
        };

        let timing = &mut timings[slot];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - i64::from(task.duration);
    }

    project_duration
}
