//! Render linearization: a total draw order for Gantt charts.
//!
//! Simple chains are consumed from both ends of a range; the remaining
//! parallel branches are matched positionally (successor `i` of the front
//! with predecessor `i` of the back) and each receives its own contiguous
//! block of indices.
//!
//! Precondition: parallel sections are structurally symmetric. Every fan-out
//! has a matching join with the same number of branches, and branch `i` out
//! of the fan-out reconverges with branch `i` into the join. Anything else is
//! reported as `PertError::AsymmetricBranching`.

use std::collections::VecDeque;

use crate::error::PertError;
use crate::models::Task;
use crate::{log_checks, log_debug};

/// Assign a render index to every slot.
///
/// # Arguments
/// * `tasks` - Arena of tasks
/// * `source` / `sink` - Slots of the single source and sink
/// * `base` - Index given to the source
/// * `verbosity` - Logging level
///
/// # Returns
/// * `Ok(indices)` indexed by slot, a permutation of `[base, base + n - 1]`
///   with every predecessor drawn before its successors
/// * `Err(PertError::AsymmetricBranching)` when the branch structure cannot
///   be matched
/// * `Err(PertError::RenderIndexOverflow)` when `base + n - 1` exceeds `u32`
pub fn linearize(
    tasks: &[Task],
    source: usize,
    sink: usize,
    base: u32,
    verbosity: u8,
) -> Result<Vec<u32>, PertError> {
    let mut linearizer = Linearizer {
        tasks,
        positions: vec![None; tasks.len()],
        verbosity,
    };
    linearizer.fill(source, sink, 0, tasks.len())?;

    let mut indices = Vec::with_capacity(tasks.len());
    for position in &linearizer.positions {
        match position {
            Some(p) => {
                let index = u32::try_from(*p)
                    .ok()
                    .and_then(|p| base.checked_add(p))
                    .ok_or(PertError::RenderIndexOverflow {
                        base,
                        tasks: tasks.len(),
                    })?;
                indices.push(index);
            }
            None => return Err(linearizer.asymmetric(source, sink)),
        }
    }

    // Crossed branches can place a task after one of its successors
    for (slot, task) in tasks.iter().enumerate() {
        for &succ in task.successors() {
            if indices[slot] >= indices[succ] {
                return Err(linearizer.asymmetric(slot, succ));
            }
        }
    }

    Ok(indices)
}

struct Linearizer<'a> {
    tasks: &'a [Task],
    /// Zero-based draw position per slot.
    positions: Vec<Option<usize>>,
    verbosity: u8,
}

impl<'a> Linearizer<'a> {
    fn asymmetric(&self, front: usize, back: usize) -> PertError {
        PertError::AsymmetricBranching {
            front: self.tasks[front].id,
            back: self.tasks[back].id,
        }
    }

    fn place(
        &mut self,
        slot: usize,
        position: usize,
        pair: (usize, usize),
    ) -> Result<(), PertError> {
        if self.positions[slot].is_some() {
            return Err(self.asymmetric(pair.0, pair.1));
        }
        log_debug!(
            self.verbosity,
            "[linearize] task {} -> position {}",
            self.tasks[slot].id,
            position
        );
        self.positions[slot] = Some(position);
        Ok(())
    }

    /// Fill positions `[low, end)` with the tasks from `front` to `back`.
    fn fill(
        &mut self,
        mut front: usize,
        mut back: usize,
        mut low: usize,
        mut end: usize,
    ) -> Result<(), PertError> {
        let tasks = self.tasks;
        let pair = (front, back);

        if low >= end {
            return Err(self.asymmetric(front, back));
        }
        self.place(front, low, pair)?;
        low += 1;

        // Consume the simple chain hanging off the front
        while front != back && tasks[front].successors().len() == 1 {
            front = tasks[front].successors()[0];
            if low >= end {
                return Err(self.asymmetric(pair.0, pair.1));
            }
            self.place(front, low, pair)?;
            low += 1;
        }

        if front == back {
            return Ok(());
        }

        if low >= end {
            return Err(self.asymmetric(pair.0, pair.1));
        }
        end -= 1;
        self.place(back, end, pair)?;

        // Consume the simple chain leading into the back
        while let [pred] = tasks[back].predecessors() {
            if self.positions[*pred].is_some() {
                break;
            }
            if low >= end {
                return Err(self.asymmetric(pair.0, pair.1));
            }
            back = *pred;
            end -= 1;
            self.place(back, end, pair)?;
        }

        let outgoing = tasks[front].successors();
        let incoming = tasks[back].predecessors();
        log_checks!(
            self.verbosity,
            "[linearize] branch point {} ({} out) / join {} ({} in), positions [{}, {})",
            tasks[front].id,
            outgoing.len(),
            tasks[back].id,
            incoming.len(),
            low,
            end
        );
        if outgoing.len() != incoming.len() {
            return Err(self.asymmetric(front, back));
        }

        let mut sizes = Vec::with_capacity(outgoing.len());
        for (&branch_front, &branch_back) in outgoing.iter().zip(incoming) {
            let size = self.branch_size(branch_front, branch_back);
            if size == 0 {
                return Err(self.asymmetric(branch_front, branch_back));
            }
            sizes.push(size);
        }
        if sizes.iter().sum::<usize>() != end - low {
            return Err(self.asymmetric(front, back));
        }

        for ((&branch_front, &branch_back), size) in outgoing.iter().zip(incoming).zip(sizes) {
            self.fill(branch_front, branch_back, low, low + size)?;
            low += size;
        }

        Ok(())
    }

    /// Number of unplaced tasks on paths from `front` to `back`, or 0 if
    /// `back` is not reachable from `front` through unplaced tasks.
    fn branch_size(&self, front: usize, back: usize) -> usize {
        let downstream = self.reach(front, |task| task.successors());
        if !downstream[back] {
            return 0;
        }
        let upstream = self.reach(back, |task| task.predecessors());
        downstream
            .iter()
            .zip(&upstream)
            .filter(|(&d, &u)| d && u)
            .count()
    }

    fn reach<F>(&self, start: usize, next: F) -> Vec<bool>
    where
        F: Fn(&'a Task) -> &'a [usize],
    {
        let tasks = self.tasks;
        let mut seen = vec![false; tasks.len()];
        if self.positions[start].is_some() {
            return seen;
        }
        let mut queue: VecDeque<usize> = VecDeque::from([start]);
        seen[start] = true;

        while let Some(slot) = queue.pop_front() {
            for &other in next(&tasks[slot]) {
                if !seen[other] && self.positions[other].is_none() {
                    seen[other] = true;
                    queue.push_back(other);
                }
            }
        }
        seen
    }
}
