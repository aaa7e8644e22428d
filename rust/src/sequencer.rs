//! Deterministic topological sequencing of the activity network.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::PertError;
use crate::index::TaskId;
use crate::models::Task;

/// Order task slots so that every predecessor comes before its successors.
///
/// Kahn's algorithm over a min-heap keyed by task id: whenever several tasks
/// are ready, the smallest id goes first. Reverse the result for the
/// backward order.
///
/// # Returns
/// * `Ok(order)` with every slot exactly once
/// * `Err(PertError::CycleDetected(id))` naming the smallest id left unordered
pub fn topological_order(tasks: &[Task]) -> Result<Vec<usize>, PertError> {
    let mut in_degree: Vec<usize> = tasks.iter().map(|t| t.predecessors().len()).collect();

    let mut ready: BinaryHeap<Reverse<(TaskId, usize)>> = tasks
        .iter()
        .enumerate()
        .filter(|(slot, _)| in_degree[*slot] == 0)
        .map(|(slot, task)| Reverse((task.id, slot)))
        .collect();

    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());

    while let Some(Reverse((_, slot))) = ready.pop() {
        order.push(slot);

        for &succ in tasks[slot].successors() {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                ready.push(Reverse((tasks[succ].id, succ)));
            }
        }
    }

    if order.len() != tasks.len() {
        let stuck = tasks
            .iter()
            .enumerate()
            .filter(|(slot, _)| in_degree[*slot] > 0)
            .map(|(_, task)| task.id)
            .min()
            .unwrap_or_default();
        return Err(PertError::CycleDetected(stuck));
    }

    Ok(order)
}

/// Longest edge counts from the source and to the sink, indexed by slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepthLevels {
    pub upstream: Vec<u32>,
    pub downstream: Vec<u32>,
}

/// Compute depth levels from a forward topological order.
pub fn depth_levels(tasks: &[Task], order: &[usize]) -> DepthLevels {
    let mut upstream = vec![0u32; tasks.len()];
    let mut downstream = vec![0u32; tasks.len()];

    for &slot in order {
        upstream[slot] = tasks[slot]
            .predecessors()
            .iter()
            .map(|&p| upstream[p] + 1)
            .max()
            .unwrap_or(0);
    }

    for &slot in order.iter().rev() {
        downstream[slot] = tasks[slot]
            .successors()
            .iter()
            .map(|&s| downstream[s] + 1)
            .max()
            .unwrap_or(0);
    }

    DepthLevels {
        upstream,
        downstream,
    }
}

/// Group task ids by upstream depth. Tasks within a layer share no edge.
pub fn layers(tasks: &[Task], levels: &DepthLevels) -> Vec<Vec<TaskId>> {
    let depth = levels.upstream.iter().copied().max().map_or(0, |d| d as usize + 1);
    let mut layers: Vec<Vec<TaskId>> = vec![Vec::new(); depth];
    for (slot, task) in tasks.iter().enumerate() {
        layers[levels.upstream[slot] as usize].push(task.id);
    }
    for layer in &mut layers {
        layer.sort_unstable();
    }
    layers
}
