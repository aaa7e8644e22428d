//! Projection of day offsets onto calendar dates.

use chrono::{Days, NaiveDate};

use crate::critical_path::TaskTiming;
use crate::error::PertError;
use crate::models::{ScheduledTask, Task};
use crate::render::GanttView;

/// Place every task on the calendar, one time unit per day.
///
/// Tasks are emitted in `order` (arena slots). `end_date` is the day the task
/// finishes: `start_date + duration`.
pub fn dated_schedule(
    tasks: &[Task],
    timings: &[TaskTiming],
    order: &[usize],
    project_start: NaiveDate,
    view: GanttView,
) -> Result<Vec<ScheduledTask>, PertError> {
    order
        .iter()
        .map(|&slot| {
            let task = &tasks[slot];
            let timing = &timings[slot];
            let start = view.start(timing);

            let start_date = offset_date(project_start, start)
                .ok_or(PertError::DateOutOfRange(task.id))?;
            let end_date = start_date
                .checked_add_days(Days::new(u64::from(task.duration)))
                .ok_or(PertError::DateOutOfRange(task.id))?;

            Ok(ScheduledTask {
                task_id: task.id,
                name: task.name.clone(),
                start_date,
                end_date,
                duration_days: task.duration,
                is_critical: timing.is_critical(),
            })
        })
        .collect()
}

fn offset_date(origin: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let days = u64::try_from(offset).ok()?;
    origin.checked_add_days(Days::new(days))
}
