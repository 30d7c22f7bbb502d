//! Diagnostics sinks for recoverable classification problems, such as an answer that
//! fails to parse.

use std::sync::Mutex;

/// Receives recoverable problems. Implementations must not fail or block.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, tag: &str, message: &str);
}

/// Forwards reports to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, tag: &str, message: &str) {
        tracing::warn!(tag, "{}", message);
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<(String, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the `(tag, message)` pairs reported so far.
    pub fn reports(&self) -> Vec<(String, String)> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn report(&self, tag: &str, message: &str) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((tag.to_string(), message.to_string()));
    }
}
