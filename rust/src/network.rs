//! The activity network: construction API and query API.

use chrono::NaiveDate;

use crate::config::ScheduleConfig;
use crate::critical_path::TaskTiming;
use crate::error::PertError;
use crate::index::{TaskId, TaskIndex};
use crate::models::{ScheduledTask, Task, TaskStatus};
use crate::render::{gantt_bars, linearize, GanttBar, GanttView};
use crate::schedule::{compute_schedule, Schedule};
use crate::sequencer::layers;
use crate::{calendar, log_changes};

/// A project activity network owning all of its tasks.
///
/// Tasks live in an arena addressed by slot; edges are slot lists kept
/// mutually consistent by [`Network::add_dependency`] and
/// [`Network::remove_dependency`]. Structural changes discard any computed
/// schedule and render order.
#[derive(Clone, Debug, Default)]
pub struct Network {
    tasks: Vec<Task>,
    index: TaskIndex,
    config: ScheduleConfig,
    schedule: Option<Schedule>,
    render_indices: Option<Vec<u32>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Task ids in declaration order.
    pub fn task_ids(&self) -> &[TaskId] {
        self.index.ids()
    }

    pub fn task(&self, id: TaskId) -> Result<&Task, PertError> {
        Ok(&self.tasks[self.slot(id)?])
    }

    fn slot(&self, id: TaskId) -> Result<usize, PertError> {
        self.index.slot(id).ok_or(PertError::UnknownTask(id))
    }

    fn ids_of(&self, slots: &[usize]) -> Vec<TaskId> {
        slots.iter().map(|&slot| self.index.id(slot)).collect()
    }

    fn invalidate(&mut self) {
        if self.schedule.is_some() || self.render_indices.is_some() {
            log_changes!(
                self.config.verbosity,
                "[network] structure changed, discarding computed schedule"
            );
        }
        self.schedule = None;
        self.render_indices = None;
    }

    /// Declare a task.
    ///
    /// # Errors
    /// * `DuplicateId` if `id` is already declared (the network is unchanged)
    pub fn add_task(&mut self, id: TaskId, duration: u32) -> Result<(), PertError> {
        let slot = self.index.insert(id).ok_or(PertError::DuplicateId(id))?;
        debug_assert_eq!(slot, self.tasks.len());
        self.tasks.push(Task::new(id, duration));
        self.invalidate();
        Ok(())
    }

    pub fn set_name(&mut self, id: TaskId, name: impl Into<String>) -> Result<(), PertError> {
        let slot = self.slot(id)?;
        self.tasks[slot].name = Some(name.into());
        Ok(())
    }

    pub fn set_description(
        &mut self,
        id: TaskId,
        description: impl Into<String>,
    ) -> Result<(), PertError> {
        let slot = self.slot(id)?;
        self.tasks[slot].description = Some(description.into());
        Ok(())
    }

    /// Declare that `succ_id` cannot start before `pred_id` finishes.
    ///
    /// Declaring an existing edge again is a no-op. No cycle check happens
    /// here; cycles are reported by [`Network::schedule`].
    ///
    /// # Errors
    /// * `UnknownTask` if either id is undeclared
    /// * `SelfDependency` if both ids are equal
    pub fn add_dependency(&mut self, pred_id: TaskId, succ_id: TaskId) -> Result<(), PertError> {
        self.insert_dependency(pred_id, succ_id, None)
    }

    /// Like [`Network::add_dependency`], but `pred_id` is inserted at
    /// `position` in the predecessor list of `succ_id` (appended when past
    /// the end).
    ///
    /// The linearizer pairs a join's predecessors with the fan-out's
    /// successors by position, so this is how a join is lined up with its
    /// fan-out.
    pub fn add_dependency_at(
        &mut self,
        pred_id: TaskId,
        succ_id: TaskId,
        position: usize,
    ) -> Result<(), PertError> {
        self.insert_dependency(pred_id, succ_id, Some(position))
    }

    fn insert_dependency(
        &mut self,
        pred_id: TaskId,
        succ_id: TaskId,
        position: Option<usize>,
    ) -> Result<(), PertError> {
        let pred = self.slot(pred_id)?;
        let succ = self.slot(succ_id)?;
        if pred == succ {
            return Err(PertError::SelfDependency(pred_id));
        }
        if self.tasks[pred].successors.contains(&succ) {
            return Ok(());
        }

        self.tasks[pred].successors.push(succ);
        let predecessors = &mut self.tasks[succ].predecessors;
        match position {
            Some(pos) if pos < predecessors.len() => predecessors.insert(pos, pred),
            _ => predecessors.push(pred),
        }
        self.invalidate();
        Ok(())
    }

    /// Replace the edge `old_pred_id -> succ_id` with `new_pred_id -> succ_id`,
    /// keeping its position in the predecessor list of `succ_id`.
    ///
    /// If `new_pred_id` already precedes `succ_id`, the old edge is simply
    /// removed and the existing one keeps its position.
    ///
    /// # Returns
    /// * `Ok(true)` if the old edge existed and was replaced
    /// * `Ok(false)` if there was no such edge (the network is unchanged)
    ///
    /// # Errors
    /// * `UnknownTask` if any id is undeclared
    /// * `SelfDependency` if `new_pred_id` equals `succ_id`
    pub fn replace_dependency(
        &mut self,
        succ_id: TaskId,
        old_pred_id: TaskId,
        new_pred_id: TaskId,
    ) -> Result<bool, PertError> {
        let succ = self.slot(succ_id)?;
        let old_pred = self.slot(old_pred_id)?;
        let new_pred = self.slot(new_pred_id)?;
        if new_pred == succ {
            return Err(PertError::SelfDependency(succ_id));
        }
        let Some(pos) = self.tasks[succ]
            .predecessors
            .iter()
            .position(|&p| p == old_pred)
        else {
            return Ok(false);
        };
        if old_pred == new_pred {
            return Ok(true);
        }

        self.tasks[old_pred].successors.retain(|&s| s != succ);
        if self.tasks[new_pred].successors.contains(&succ) {
            self.tasks[succ].predecessors.remove(pos);
        } else {
            self.tasks[new_pred].successors.push(succ);
            self.tasks[succ].predecessors[pos] = new_pred;
        }
        self.invalidate();
        Ok(true)
    }

    /// Remove the edge `pred_id -> succ_id`.
    ///
    /// # Returns
    /// * `Ok(true)` if the edge existed and was removed
    /// * `Ok(false)` if there was no such edge
    pub fn remove_dependency(
        &mut self,
        pred_id: TaskId,
        succ_id: TaskId,
    ) -> Result<bool, PertError> {
        let pred = self.slot(pred_id)?;
        let succ = self.slot(succ_id)?;

        let Some(pos) = self.tasks[pred].successors.iter().position(|&s| s == succ) else {
            return Ok(false);
        };
        self.tasks[pred].successors.remove(pos);
        self.tasks[succ].predecessors.retain(|&p| p != pred);
        self.invalidate();
        Ok(true)
    }

    /// Predecessor ids of a task, in declaration order.
    pub fn predecessors(&self, id: TaskId) -> Result<Vec<TaskId>, PertError> {
        Ok(self.ids_of(self.task(id)?.predecessors()))
    }

    /// Successor ids of a task, in declaration order.
    pub fn successors(&self, id: TaskId) -> Result<Vec<TaskId>, PertError> {
        Ok(self.ids_of(self.task(id)?.successors()))
    }

    pub fn status(&self, id: TaskId) -> Result<TaskStatus, PertError> {
        Ok(self.task(id)?.status)
    }

    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<(), PertError> {
        let slot = self.slot(id)?;
        self.tasks[slot].status = status;
        Ok(())
    }

    /// Move a task to its next status.
    ///
    /// # Errors
    /// * `AlreadyFinished` if the task is finished
    pub fn advance_status(&mut self, id: TaskId) -> Result<TaskStatus, PertError> {
        let slot = self.slot(id)?;
        let next = self.tasks[slot]
            .status
            .next()
            .ok_or(PertError::AlreadyFinished(id))?;
        self.tasks[slot].status = next;
        Ok(next)
    }

    /// Unfinished tasks whose predecessors are all finished, by ascending id.
    pub fn ready_tasks(&self) -> Vec<TaskId> {
        let mut ready: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.status != TaskStatus::Finished)
            .filter(|task| {
                task.predecessors()
                    .iter()
                    .all(|&p| self.tasks[p].status == TaskStatus::Finished)
            })
            .map(|task| task.id)
            .collect();
        ready.sort_unstable();
        ready
    }

    /// Run sequencing, both passes and critical path extraction.
    ///
    /// Any previous results are discarded first, so a failed call leaves the
    /// network unscheduled. Re-running on an unchanged network yields the
    /// same results.
    ///
    /// # Errors
    /// * `InvalidTopology` unless there is exactly one source and one sink
    /// * `CycleDetected` if the dependencies form a cycle
    /// * `InvariantViolation` if the computed schedule is inconsistent
    pub fn schedule(&mut self) -> Result<(), PertError> {
        self.schedule = None;
        self.render_indices = None;
        self.schedule = Some(compute_schedule(&self.tasks, &self.config)?);
        Ok(())
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    fn scheduled(&self) -> Result<&Schedule, PertError> {
        self.schedule.as_ref().ok_or(PertError::NotScheduled)
    }

    /// Full timing record of one task.
    pub fn timing(&self, id: TaskId) -> Result<TaskTiming, PertError> {
        let slot = self.slot(id)?;
        Ok(self.scheduled()?.timings[slot])
    }

    pub fn earliest_start(&self, id: TaskId) -> Result<i64, PertError> {
        Ok(self.timing(id)?.earliest_start)
    }

    pub fn earliest_finish(&self, id: TaskId) -> Result<i64, PertError> {
        Ok(self.timing(id)?.earliest_finish)
    }

    pub fn latest_start(&self, id: TaskId) -> Result<i64, PertError> {
        Ok(self.timing(id)?.latest_start)
    }

    pub fn latest_finish(&self, id: TaskId) -> Result<i64, PertError> {
        Ok(self.timing(id)?.latest_finish)
    }

    pub fn slack(&self, id: TaskId) -> Result<i64, PertError> {
        Ok(self.timing(id)?.slack)
    }

    pub fn is_critical(&self, id: TaskId) -> Result<bool, PertError> {
        Ok(self.timing(id)?.is_critical())
    }

    /// The sink's earliest finish: the minimal total span of the project.
    pub fn project_duration(&self) -> Result<i64, PertError> {
        Ok(self.scheduled()?.project_duration)
    }

    /// The canonical critical path, source to sink.
    ///
    /// From each task the walk moves to the smallest-id critical successor
    /// that starts exactly when the task finishes. A critical successor
    /// reached over an edge with a gap is skipped, even when its id is
    /// smaller, so the path always spans the full project duration.
    pub fn critical_path(&self) -> Result<Vec<TaskId>, PertError> {
        Ok(self.ids_of(&self.scheduled()?.critical_path))
    }

    /// Forward topological order used by the passes.
    pub fn topological_order(&self) -> Result<Vec<TaskId>, PertError> {
        Ok(self.ids_of(&self.scheduled()?.order))
    }

    pub fn source(&self) -> Result<TaskId, PertError> {
        Ok(self.index.id(self.scheduled()?.source))
    }

    pub fn sink(&self) -> Result<TaskId, PertError> {
        Ok(self.index.id(self.scheduled()?.sink))
    }

    /// Longest edge count from the source to `id`.
    pub fn upstream_depth(&self, id: TaskId) -> Result<u32, PertError> {
        let slot = self.slot(id)?;
        Ok(self.scheduled()?.levels.upstream[slot])
    }

    /// Longest edge count from `id` to the sink.
    pub fn downstream_depth(&self, id: TaskId) -> Result<u32, PertError> {
        let slot = self.slot(id)?;
        Ok(self.scheduled()?.levels.downstream[slot])
    }

    /// Task ids grouped by upstream depth; tasks in one layer share no edge.
    pub fn layers(&self) -> Result<Vec<Vec<TaskId>>, PertError> {
        Ok(layers(&self.tasks, &self.scheduled()?.levels))
    }

    /// Assign render indices. Requires a schedule.
    ///
    /// A failure leaves the schedule intact and only discards render indices.
    ///
    /// # Errors
    /// * `NotScheduled` if [`Network::schedule`] has not succeeded
    /// * `AsymmetricBranching` if parallel sections cannot be matched
    /// * `RenderIndexOverflow` if the configured base leaves no room for
    ///   every task
    pub fn linearize(&mut self) -> Result<(), PertError> {
        self.render_indices = None;
        let schedule = self.scheduled()?;
        let indices = linearize(
            &self.tasks,
            schedule.source,
            schedule.sink,
            self.config.render_index_base,
            self.config.verbosity,
        )?;
        log_changes!(
            self.config.verbosity,
            "[network] render order assigned to {} tasks",
            indices.len()
        );
        self.render_indices = Some(indices);
        Ok(())
    }

    pub fn is_linearized(&self) -> bool {
        self.render_indices.is_some()
    }

    fn rendered(&self) -> Result<&[u32], PertError> {
        self.render_indices
            .as_deref()
            .ok_or(PertError::NotLinearized)
    }

    pub fn render_index(&self, id: TaskId) -> Result<u32, PertError> {
        let slot = self.slot(id)?;
        Ok(self.rendered()?[slot])
    }

    /// Task ids sorted by render index.
    pub fn render_order(&self) -> Result<Vec<TaskId>, PertError> {
        let indices = self.rendered()?;
        let mut slots: Vec<usize> = (0..self.tasks.len()).collect();
        slots.sort_by_key(|&slot| indices[slot]);
        Ok(self.ids_of(&slots))
    }

    /// One Gantt bar per task, in render order.
    pub fn gantt_bars(&self, view: GanttView) -> Result<Vec<GanttBar>, PertError> {
        let schedule = self.scheduled()?;
        let indices = self.rendered()?;
        Ok(gantt_bars(&self.tasks, &schedule.timings, indices, view))
    }

    /// Calendar dates for every task, one time unit per day.
    ///
    /// Tasks come in render order when linearized, topological order
    /// otherwise.
    pub fn dated_schedule(
        &self,
        project_start: NaiveDate,
        view: GanttView,
    ) -> Result<Vec<ScheduledTask>, PertError> {
        let schedule = self.scheduled()?;
        let order: Vec<usize> = match self.render_indices.as_deref() {
            Some(indices) => {
                let mut slots: Vec<usize> = (0..self.tasks.len()).collect();
                slots.sort_by_key(|&slot| indices[slot]);
                slots
            }
            None => schedule.order.clone(),
        };
        calendar::dated_schedule(&self.tasks, &schedule.timings, &order, project_start, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a network from (id, duration) tasks and (pred, succ) edges.
    fn make_network(tasks: &[(TaskId, u32)], edges: &[(TaskId, TaskId)]) -> Network {
        let mut network = Network::new();
        for &(id, duration) in tasks {
            network.add_task(id, duration).unwrap();
        }
        for &(pred, succ) in edges {
            network.add_dependency(pred, succ).unwrap();
        }
        network
    }

    /// 1 -> 2 -> 3 with durations 5, 3, 4.
    fn chain() -> Network {
        make_network(&[(1, 5), (2, 3), (3, 4)], &[(1, 2), (2, 3)])
    }

    /// 0 -> {1 (A, 5), 2 (B, 8)} -> 3
    fn diamond() -> Network {
        make_network(
            &[(0, 0), (1, 5), (2, 8), (3, 0)],
            &[(0, 1), (0, 2), (1, 3), (2, 3)],
        )
    }

    /// Ten-task project: 1 -> 2 -> {3, 10}; 3 -> {4, 5} -> 6; 10 -> 9;
    /// {6, 9} -> 7 -> 8.
    fn project() -> Network {
        make_network(
            &[
                (1, 2),
                (2, 4),
                (3, 3),
                (4, 6),
                (5, 2),
                (6, 1),
                (7, 5),
                (8, 1),
                (9, 3),
                (10, 4),
            ],
            &[
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 6),
                (3, 5),
                (5, 6),
                (6, 7),
                (7, 8),
                (2, 10),
                (10, 9),
                (9, 7),
            ],
        )
    }

    fn edges(network: &Network) -> Vec<(TaskId, TaskId)> {
        let mut edges = Vec::new();
        for &id in network.task_ids() {
            for succ in network.successors(id).unwrap() {
                edges.push((id, succ));
            }
        }
        edges
    }

    fn assert_schedule_properties(network: &Network) {
        let source = network.source().unwrap();
        let sink = network.sink().unwrap();
        assert_eq!(network.earliest_start(source).unwrap(), 0);
        assert_eq!(
            network.latest_finish(sink).unwrap(),
            network.project_duration().unwrap()
        );

        for &id in network.task_ids() {
            let slack = network.slack(id).unwrap();
            assert!(slack >= 0, "task {id} has negative slack");
            assert_eq!(network.is_critical(id).unwrap(), slack == 0);
        }

        for (p, s) in edges(network) {
            let duration = i64::from(network.task(p).unwrap().duration);
            assert!(network.earliest_start(s).unwrap() >= network.earliest_start(p).unwrap() + duration);
            assert!(network.latest_start(p).unwrap() <= network.latest_start(s).unwrap() - duration);
        }

        let path = network.critical_path().unwrap();
        assert_eq!(path.first(), Some(&source));
        assert_eq!(path.last(), Some(&sink));
        for pair in path.windows(2) {
            assert!(network.successors(pair[0]).unwrap().contains(&pair[1]));
            assert_eq!(network.slack(pair[0]).unwrap(), 0);
            assert_eq!(network.slack(pair[1]).unwrap(), 0);
        }
    }

    fn assert_render_properties(network: &Network) {
        let mut indices: Vec<u32> = network
            .task_ids()
            .iter()
            .map(|&id| network.render_index(id).unwrap())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..network.len() as u32).collect::<Vec<_>>());

        for (p, s) in edges(network) {
            assert!(network.render_index(p).unwrap() < network.render_index(s).unwrap());
        }
    }

    #[test]
    fn test_chain_scenario() {
        let mut network = chain();
        network.schedule().unwrap();

        let earliest: Vec<i64> = [1, 2, 3]
            .iter()
            .map(|&id| network.earliest_start(id).unwrap())
            .collect();
        let latest: Vec<i64> = [1, 2, 3]
            .iter()
            .map(|&id| network.latest_start(id).unwrap())
            .collect();
        assert_eq!(earliest, vec![0, 5, 8]);
        assert_eq!(latest, vec![0, 5, 8]);
        assert!([1, 2, 3].iter().all(|&id| network.is_critical(id).unwrap()));
        assert_eq!(network.project_duration(), Ok(12));
        assert_eq!(network.critical_path(), Ok(vec![1, 2, 3]));
        assert_schedule_properties(&network);
    }

    #[test]
    fn test_diamond_scenario() {
        let mut network = diamond();
        network.schedule().unwrap();

        assert_eq!(network.earliest_start(3), Ok(8));
        assert_eq!(network.slack(1), Ok(3));
        assert_eq!(network.slack(2), Ok(0));
        assert_eq!(network.critical_path(), Ok(vec![0, 2, 3]));
        assert_schedule_properties(&network);
    }

    #[test]
    fn test_project_scenario() {
        let mut network = project();
        network.schedule().unwrap();

        // 1(2) 2(4) then branch 3(3) 4(6) 6(1) = 16 vs 10(4) 9(3) = 13
        assert_eq!(network.earliest_start(7), Ok(16));
        assert_eq!(network.project_duration(), Ok(22));
        assert_eq!(network.critical_path(), Ok(vec![1, 2, 3, 4, 6, 7, 8]));
        assert_eq!(network.slack(5), Ok(4));
        assert_eq!(network.slack(10), Ok(3));
        assert_eq!(network.slack(9), Ok(3));
        assert_schedule_properties(&network);

        network.linearize().unwrap();
        assert_eq!(
            network.render_order(),
            Ok(vec![1, 2, 3, 4, 5, 6, 10, 9, 7, 8])
        );
        assert_render_properties(&network);
    }

    #[test]
    fn test_duplicate_id() {
        let mut network = chain();
        assert_eq!(network.add_task(2, 9), Err(PertError::DuplicateId(2)));
        assert_eq!(network.len(), 3);
        assert_eq!(network.task(2).unwrap().duration, 3);
    }

    #[test]
    fn test_dependency_errors_leave_network_unchanged() {
        let mut network = chain();
        assert_eq!(network.add_dependency(1, 42), Err(PertError::UnknownTask(42)));
        assert_eq!(network.add_dependency(42, 1), Err(PertError::UnknownTask(42)));
        assert_eq!(network.add_dependency(2, 2), Err(PertError::SelfDependency(2)));
        assert_eq!(network.successors(1), Ok(vec![2]));
        assert_eq!(network.predecessors(2), Ok(vec![1]));
    }

    #[test]
    fn test_repeated_edge_is_ignored() {
        let mut network = chain();
        network.add_dependency(1, 2).unwrap();
        assert_eq!(network.successors(1), Ok(vec![2]));
        assert_eq!(network.predecessors(2), Ok(vec![1]));
    }

    #[test]
    fn test_two_sources_invalid_topology() {
        let mut network = make_network(&[(1, 1), (2, 1), (3, 1)], &[(1, 3), (2, 3)]);
        assert_eq!(
            network.schedule(),
            Err(PertError::InvalidTopology {
                sources: 2,
                sinks: 1
            })
        );
        assert!(!network.is_scheduled());
        assert_eq!(network.earliest_start(1), Err(PertError::NotScheduled));
    }

    #[test]
    fn test_two_sinks_invalid_topology() {
        let mut network = make_network(&[(1, 1), (2, 1), (3, 1)], &[(1, 2), (1, 3)]);
        assert_eq!(
            network.schedule(),
            Err(PertError::InvalidTopology {
                sources: 1,
                sinks: 2
            })
        );
    }

    #[test]
    fn test_empty_network_invalid_topology() {
        let mut network = Network::new();
        assert_eq!(
            network.schedule(),
            Err(PertError::InvalidTopology {
                sources: 0,
                sinks: 0
            })
        );
    }

    #[test]
    fn test_cycle_detected() {
        let mut network = make_network(
            &[(1, 1), (2, 1), (3, 1), (4, 1)],
            &[(1, 2), (2, 3), (3, 2), (3, 4)],
        );
        assert_eq!(network.schedule(), Err(PertError::CycleDetected(2)));
        assert!(!network.is_scheduled());
    }

    #[test]
    fn test_failed_reschedule_discards_old_results() {
        let mut network = chain();
        network.schedule().unwrap();
        network.add_task(4, 1).unwrap();
        assert_eq!(network.project_duration(), Err(PertError::NotScheduled));
        assert!(network.schedule().is_err());
        assert!(!network.is_scheduled());
    }

    #[test]
    fn test_rescheduling_is_idempotent() {
        let mut network = project();
        network.schedule().unwrap();
        let first: Vec<TaskTiming> = network
            .task_ids()
            .iter()
            .map(|&id| network.timing(id).unwrap())
            .collect();
        let path = network.critical_path().unwrap();

        network.schedule().unwrap();
        let second: Vec<TaskTiming> = network
            .task_ids()
            .iter()
            .map(|&id| network.timing(id).unwrap())
            .collect();
        assert_eq!(first, second);
        assert_eq!(network.critical_path(), Ok(path));
    }

    #[test]
    fn test_structural_change_invalidates() {
        let mut network = diamond();
        network.schedule().unwrap();
        network.linearize().unwrap();

        assert_eq!(network.remove_dependency(0, 1), Ok(true));
        assert!(!network.is_scheduled());
        assert!(!network.is_linearized());
        assert_eq!(network.render_index(0), Err(PertError::NotLinearized));

        // Now 1 is a second source
        assert!(matches!(
            network.schedule(),
            Err(PertError::InvalidTopology { sources: 2, .. })
        ));
    }

    #[test]
    fn test_remove_missing_edge() {
        let mut network = diamond();
        network.schedule().unwrap();
        assert_eq!(network.remove_dependency(1, 2), Ok(false));
        assert!(network.is_scheduled());
        assert_eq!(network.remove_dependency(1, 99), Err(PertError::UnknownTask(99)));
    }

    #[test]
    fn test_metadata_does_not_invalidate() {
        let mut network = chain();
        network.schedule().unwrap();
        network.set_name(1, "design").unwrap();
        network.set_description(1, "draw the plans").unwrap();
        assert!(network.is_scheduled());
        assert_eq!(network.task(1).unwrap().name.as_deref(), Some("design"));
        assert_eq!(network.set_name(7, "x"), Err(PertError::UnknownTask(7)));
    }

    #[test]
    fn test_unknown_query_id() {
        let mut network = chain();
        network.schedule().unwrap();
        assert_eq!(network.slack(99), Err(PertError::UnknownTask(99)));
    }

    #[test]
    fn test_linearize_requires_schedule() {
        let mut network = chain();
        assert_eq!(network.linearize(), Err(PertError::NotScheduled));
    }

    #[test]
    fn test_asymmetric_branching_keeps_schedule() {
        // 1 -> {2, 3, 4}; {2, 3} -> 5; {4, 5} -> 6
        let mut network = make_network(
            &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 1), (6, 1)],
            &[(1, 2), (1, 3), (1, 4), (2, 5), (3, 5), (4, 6), (5, 6)],
        );
        network.schedule().unwrap();
        assert!(matches!(
            network.linearize(),
            Err(PertError::AsymmetricBranching { .. })
        ));
        assert!(!network.is_linearized());
        assert_eq!(network.project_duration(), Ok(6));
        assert_schedule_properties(&network);
    }

    #[test]
    fn test_render_index_base() {
        let mut network = Network::with_config(ScheduleConfig {
            render_index_base: 1,
            ..ScheduleConfig::default()
        });
        for (id, duration) in [(0, 0), (1, 5), (2, 8), (3, 0)] {
            network.add_task(id, duration).unwrap();
        }
        for (p, s) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            network.add_dependency(p, s).unwrap();
        }
        network.schedule().unwrap();
        network.linearize().unwrap();
        assert_eq!(network.render_index(0), Ok(1));
        assert_eq!(network.render_index(3), Ok(4));
    }

    #[test]
    fn test_depths_and_layers() {
        let mut network = project();
        network.schedule().unwrap();
        assert_eq!(network.upstream_depth(1), Ok(0));
        assert_eq!(network.upstream_depth(7), Ok(5));
        assert_eq!(network.downstream_depth(1), Ok(6));
        assert_eq!(network.downstream_depth(9), Ok(2));
        assert_eq!(
            network.layers(),
            Ok(vec![
                vec![1],
                vec![2],
                vec![3, 10],
                vec![4, 5, 9],
                vec![6],
                vec![7],
                vec![8],
            ])
        );
    }

    #[test]
    fn test_gantt_bars() {
        let mut network = diamond();
        network.set_name(2, "B").unwrap();
        network.schedule().unwrap();
        assert_eq!(network.gantt_bars(GanttView::Earliest), Err(PertError::NotLinearized));
        network.linearize().unwrap();

        let bars = network.gantt_bars(GanttView::Latest).unwrap();
        let ids: Vec<TaskId> = bars.iter().map(|bar| bar.task_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!((bars[1].start, bars[1].finish), (3, 8));
        assert_eq!(bars[2].name.as_deref(), Some("B"));
        assert!(bars[2].is_critical);
    }

    #[test]
    fn test_dated_schedule() {
        let mut network = chain();
        network.schedule().unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let dated = network.dated_schedule(start, GanttView::Earliest).unwrap();
        let ids: Vec<TaskId> = dated.iter().map(|t| t.task_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(dated[2].start_date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(dated[2].end_date, NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
    }

    #[test]
    fn test_status_tracking() {
        let mut network = diamond();
        assert_eq!(network.ready_tasks(), vec![0]);

        network.set_status(0, TaskStatus::Verifying).unwrap();
        assert_eq!(network.advance_status(0), Ok(TaskStatus::Finished));
        assert_eq!(network.advance_status(0), Err(PertError::AlreadyFinished(0)));
        assert_eq!(network.ready_tasks(), vec![1, 2]);

        network.set_status(1, TaskStatus::Finished).unwrap();
        assert_eq!(network.ready_tasks(), vec![2]);
        assert_eq!(network.status(2), Ok(TaskStatus::NotStarted));
    }

    #[test]
    fn test_render_index_base_overflow() {
        let build = |base: u32| {
            let mut network = Network::with_config(ScheduleConfig {
                render_index_base: base,
                ..ScheduleConfig::default()
            });
            network.add_task(1, 1).unwrap();
            network.add_task(2, 1).unwrap();
            network.add_dependency(1, 2).unwrap();
            network.schedule().unwrap();
            network
        };

        let mut network = build(u32::MAX);
        assert_eq!(
            network.linearize(),
            Err(PertError::RenderIndexOverflow {
                base: u32::MAX,
                tasks: 2
            })
        );
        assert!(network.is_scheduled());
        assert!(!network.is_linearized());

        let mut network = build(u32::MAX - 1);
        network.linearize().unwrap();
        assert_eq!(network.render_index(2), Ok(u32::MAX));
    }

    #[test]
    fn test_positioned_edge_lines_up_join() {
        // Join 6 lists 5 before 4 while fan-out 1 lists 2 before 3
        let mut network = make_network(
            &[(1, 1), (2, 2), (3, 3), (4, 1), (5, 1), (6, 1)],
            &[(1, 2), (1, 3), (2, 4), (3, 5), (5, 6), (4, 6)],
        );
        network.schedule().unwrap();
        assert!(matches!(
            network.linearize(),
            Err(PertError::AsymmetricBranching { .. })
        ));

        assert_eq!(network.remove_dependency(4, 6), Ok(true));
        network.add_dependency_at(4, 6, 0).unwrap();
        assert_eq!(network.predecessors(6), Ok(vec![4, 5]));
        assert!(!network.is_scheduled());

        network.schedule().unwrap();
        network.linearize().unwrap();
        assert_eq!(network.render_order(), Ok(vec![1, 2, 4, 3, 5, 6]));
        assert_render_properties(&network);
    }

    #[test]
    fn test_add_dependency_at_past_end_appends() {
        let mut network = diamond();
        network.add_task(4, 1).unwrap();
        network.add_dependency(0, 4).unwrap();
        network.add_dependency_at(4, 3, 10).unwrap();
        assert_eq!(network.predecessors(3), Ok(vec![1, 2, 4]));
        assert_eq!(network.successors(4), Ok(vec![3]));
    }

    #[test]
    fn test_replace_dependency_keeps_position() {
        // 1 -> {2, 3} -> 4 -> 5; task 6 is spliced in between 2 and 4
        let mut network = make_network(
            &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1)],
            &[(1, 2), (1, 3), (2, 4), (3, 4), (4, 5), (2, 6)],
        );
        assert_eq!(
            network.schedule(),
            Err(PertError::InvalidTopology {
                sources: 1,
                sinks: 2
            })
        );

        assert_eq!(network.replace_dependency(4, 2, 6), Ok(true));
        assert_eq!(network.predecessors(4), Ok(vec![6, 3]));
        assert_eq!(network.successors(2), Ok(vec![6]));
        assert_eq!(network.successors(6), Ok(vec![4]));

        network.schedule().unwrap();
        network.linearize().unwrap();
        assert_eq!(network.render_order(), Ok(vec![1, 2, 6, 3, 4, 5]));
        assert_schedule_properties(&network);
        assert_render_properties(&network);
    }

    #[test]
    fn test_replace_dependency_errors() {
        let mut network = diamond();
        assert_eq!(network.replace_dependency(3, 0, 1), Ok(false));
        assert_eq!(
            network.replace_dependency(3, 1, 3),
            Err(PertError::SelfDependency(3))
        );
        assert_eq!(
            network.replace_dependency(3, 1, 42),
            Err(PertError::UnknownTask(42))
        );
        assert_eq!(network.predecessors(3), Ok(vec![1, 2]));

        // Replacing with an existing predecessor collapses the two edges
        assert_eq!(network.replace_dependency(3, 1, 2), Ok(true));
        assert_eq!(network.predecessors(3), Ok(vec![2]));
        assert_eq!(network.successors(1), Ok(vec![]));
    }
}
