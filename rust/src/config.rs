//! Configuration for the scheduling engine.

use pyo3::prelude::*;

/// Configuration shared by every pass run over a network.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Render index given to the source; indices span `[base, base + n - 1]`.
    #[pyo3(get, set)]
    pub render_index_base: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            render_index_base: 0,
        }
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, render_index_base=None))]
    fn new(verbosity: Option<u8>, render_index_base: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            render_index_base: render_index_base.unwrap_or(defaults.render_index_base),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(verbosity={}, render_index_base={})",
            self.verbosity, self.render_index_base
        )
    }
}
