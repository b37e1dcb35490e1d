//! Rust -> Python conversions for the event driver.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::{LogSeverity, TimedLogEntry};
use crate::orchestrator::{EventReport, TickOutcome};

fn severity_label(severity: LogSeverity) -> &'static str {
    match severity {
        LogSeverity::Info => "info",
        LogSeverity::Warning => "warning",
        LogSeverity::Critical => "critical",
    }
}

/// Convert an `EventReport` to a Python dict.
pub fn report_to_py(py: Python, report: &EventReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("guests_processed", report.guests_processed)?;
    dict.set_item("incidents_prevented", report.incidents_prevented)?;
    dict.set_item("incidents_missed", report.incidents_missed)?;
    dict.set_item("reputation_change", report.reputation_change)?;
    dict.set_item("final_reputation", report.final_reputation)?;
    dict.set_item("ended_early", report.ended_early)?;
    Ok(dict.into())
}

/// Convert a `TickOutcome` to a Python dict.
///
/// Keys: `game_time`, `ran`, per-tick counters and `reputation` (only when
/// the engine ran), `logs` (list of `{message, severity}`), `report` (dict or
/// None).
pub fn tick_outcome_to_py(py: Python, outcome: &TickOutcome) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("game_time", outcome.game_time)?;
    dict.set_item("ran", outcome.summary.is_some())?;

    let logs = PyList::empty(py);
    if let Some(summary) = &outcome.summary {
        let counters = summary.counters();
        dict.set_item("reputation", summary.reputation)?;
        dict.set_item("guests_arrived", counters.guests_arrived)?;
        dict.set_item("guests_switched", counters.guests_switched)?;
        dict.set_item("guests_processed", counters.guests_processed)?;
        dict.set_item("incidents_prevented", counters.incidents_prevented)?;
        dict.set_item("incidents_missed", counters.incidents_missed)?;
        for entry in &summary.log_entries {
            let item = PyDict::new(py);
            item.set_item("message", &entry.message)?;
            item.set_item("severity", severity_label(entry.severity))?;
            logs.append(item)?;
        }
    }
    dict.set_item("logs", logs)?;

    match &outcome.report {
        Some(report) => dict.set_item("report", report_to_py(py, report)?)?,
        None => dict.set_item("report", py.None())?,
    }
    Ok(dict.into())
}

/// Convert a player log entry to a Python dict.
pub fn log_entry_to_py(py: Python, entry: &TimedLogEntry) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("time", &entry.time)?;
    dict.set_item("message", &entry.message)?;
    dict.set_item("severity", severity_label(entry.severity))?;
    Ok(dict.into())
}
