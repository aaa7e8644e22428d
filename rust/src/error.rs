//! Error types for network construction, scheduling and linearization.

use thiserror::Error;

use crate::index::TaskId;

/// Errors raised by the scheduling engine.
///
/// Construction errors leave the network untouched. `InvalidTopology` and
/// `CycleDetected` abort a scheduling call and discard every computed field.
/// `AsymmetricBranching` only aborts linearization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PertError {
    #[error("Task {0} already exists")]
    DuplicateId(TaskId),
    #[error("Unknown task: {0}")]
    UnknownTask(TaskId),
    #[error("Task {0} cannot depend on itself")]
    SelfDependency(TaskId),
    #[error(
        "Invalid topology: expected one source and one sink, found {sources} source(s) and {sinks} sink(s)"
    )]
    InvalidTopology { sources: usize, sinks: usize },
    #[error("Cycle detected: task {0} could not be ordered")]
    CycleDetected(TaskId),
    #[error("Asymmetric branching between task {front} and task {back}")]
    AsymmetricBranching { front: TaskId, back: TaskId },
    #[error("Render index base {base} leaves no room for {tasks} task(s)")]
    RenderIndexOverflow { base: u32, tasks: usize },
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Network has not been scheduled")]
    NotScheduled,
    #[error("Render order has not been computed")]
    NotLinearized,
    #[error("Task {0} is already finished")]
    AlreadyFinished(TaskId),
    #[error("Dates of task {0} fall outside the supported calendar range")]
    DateOutOfRange(TaskId),
}
