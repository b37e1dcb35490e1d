//! PyO3 wrapper for the event driver
//!
//! # Example (from Python)
//!
//! ```python
//! from stadium_security_core_rs import EventOrchestrator
//!
//! event = EventOrchestrator(None, 42)
//! event.set_all_gates(True)
//! while not event.is_finished():
//!     result = event.tick()
//! print(event.report())
//! ```

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{log_entry_to_py, report_to_py, tick_outcome_to_py};
use crate::config::GameConfig;
use crate::orchestrator::{EventOrchestrator, SimulationError};

fn to_py_err(error: SimulationError) -> PyErr {
    match error {
        SimulationError::GateNotFound(_) => PyKeyError::new_err(error.to_string()),
        SimulationError::InvalidConfig(_) => PyValueError::new_err(error.to_string()),
        SimulationError::EventFinished => PyRuntimeError::new_err(error.to_string()),
    }
}

#[pyclass(name = "EventOrchestrator")]
pub struct PyEventOrchestrator {
    inner: EventOrchestrator,
}

#[pymethods]
impl PyEventOrchestrator {
    /// Create an event from an optional JSON config and a seed.
    ///
    /// Raises ValueError on malformed or invalid configuration.
    #[new]
    #[pyo3(signature = (config_json=None, seed=None))]
    fn new(config_json: Option<&str>, seed: Option<u64>) -> PyResult<Self> {
        let mut config = match config_json {
            Some(json) => GameConfig::from_json_str(json)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => GameConfig::default(),
        };
        if let Some(seed) = seed {
            config.rng_seed = seed;
        }
        let inner = EventOrchestrator::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Advance one game minute; returns the tick summary as a dict.
    fn tick(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let outcome = self.inner.tick().map_err(to_py_err)?;
        tick_outcome_to_py(py, &outcome)
    }

    fn toggle_gate(&mut self, gate_id: u32) -> PyResult<bool> {
        self.inner.toggle_gate(gate_id).map_err(to_py_err)
    }

    fn set_all_gates(&mut self, open: bool) -> PyResult<()> {
        self.inner.set_all_gates(open).map_err(to_py_err)
    }

    /// Full world state (gates, queues, staff, reputation) as JSON.
    fn state_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.state())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn report(&self, py: Python) -> PyResult<Option<Py<PyDict>>> {
        self.inner
            .report()
            .map(|report| report_to_py(py, report))
            .transpose()
    }

    /// Player log, newest first.
    fn log(&self, py: Python) -> PyResult<Py<PyList>> {
        let list = PyList::empty(py);
        for entry in self.inner.log().iter() {
            list.append(log_entry_to_py(py, entry)?)?;
        }
        Ok(list.into())
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn game_time(&self) -> String {
        self.inner.clock().format_hhmm()
    }

    fn phase(&self) -> &'static str {
        self.inner.phase().label()
    }

    fn reputation(&self) -> f64 {
        self.inner.reputation()
    }

    fn total_queue_size(&self) -> usize {
        self.inner.total_queue_size()
    }
}
