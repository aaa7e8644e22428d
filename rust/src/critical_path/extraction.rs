//! Slack computation and canonical critical path extraction.

use crate::error::PertError;
use crate::models::Task;

use super::types::TaskTiming;

/// Fill in `slack` for every task once both passes have run.
///
/// Negative slack means the passes ran out of order and is reported as an
/// invariant violation.
pub fn compute_slack(tasks: &[Task], timings: &mut [TaskTiming]) -> Result<(), PertError> {
    for (task, timing) in tasks.iter().zip(timings.iter_mut()) {
        timing.slack = timing.latest_start - timing.earliest_start;
        if timing.slack < 0 {
            return Err(PertError::InvariantViolation(format!(
                "task {} has negative slack {}",
                task.id, timing.slack
            )));
        }
    }
    Ok(())
}

/// Walk one zero-slack chain from `source` to `sink`.
///
/// At each step the next task is the smallest-id critical successor that
/// starts exactly when the current task finishes. Every critical non-sink
/// task has one: the successor defining its latest finish.
pub fn canonical_critical_path(
    tasks: &[Task],
    timings: &[TaskTiming],
    source: usize,
    sink: usize,
) -> Result<Vec<usize>, PertError> {
    if !timings[source].is_critical() {
        return Err(PertError::InvariantViolation(format!(
            "source task {} is not critical",
            tasks[source].id
        )));
    }

    let mut path = vec![source];
    let mut current = source;

    while current != sink {
        // A DAG path never revisits a task
        if path.len() > tasks.len() {
            return Err(PertError::InvariantViolation(
                "critical path walk did not reach the sink".to_string(),
            ));
        }

        let finish = timings[current].earliest_finish;
        let next = tasks[current]
            .successors()
            .iter()
            .copied()
            .filter(|&succ| timings[succ].is_critical() && timings[succ].earliest_start == finish)
            .min_by_key(|&succ| tasks[succ].id);

        current = next.ok_or_else(|| {
            PertError::InvariantViolation(format!(
                "critical task {} has no critical successor",
                tasks[current].id
            ))
        })?;
        path.push(current);
    }

    Ok(path)
}
