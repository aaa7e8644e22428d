//! Linear display order and Gantt projections.

mod gantt;
mod linearizer;

pub use gantt::{gantt_bars, GanttBar, GanttView};
pub use linearizer::linearize;
