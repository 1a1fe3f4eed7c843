//! Status and decision reporting seam.
//!
//! The capture thread reports through a narrow [`StatusSink`] so the
//! rendering side (console here, an LCD on the original hardware) stays an
//! external collaborator.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::types::MatchOutcome;

/// Receives status text and final decisions from the capture thread.
pub trait StatusSink: Send {
    /// Transient progress text ("Calibrating...", "Recording...").
    fn status(&mut self, text: &str);

    /// Final outcome of a verify cycle.
    fn decision(&mut self, outcome: &MatchOutcome);
}

/// Console sink: statuses go to the log, decisions to stdout.
#[derive(Debug, Default)]
pub struct ConsoleUi;

impl StatusSink for ConsoleUi {
    fn status(&mut self, text: &str) {
        log::info!("{}", text);
    }

    fn decision(&mut self, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Decision(decision) => {
                log::info!(
                    "correlation: x={:.3} y={:.3} z={:.3}",
                    decision.correlation[0],
                    decision.correlation[1],
                    decision.correlation[2]
                );
                if decision.accepted {
                    println!("UNLOCK: SUCCESS");
                } else {
                    println!("UNLOCK: FAILED");
                }
            }
            MatchOutcome::NoReference => println!("NO GESTURE ENROLLED"),
            MatchOutcome::Indeterminate => println!("UNLOCK: INDETERMINATE"),
        }
    }
}

/// In-memory sink for tests and headless runs; shares its record through a
/// cloneable handle so callers can inspect it after the sink moves into the
/// capture session.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySinkRecord>>,
}

/// What a [`MemorySink`] has seen so far.
#[derive(Debug, Default, Clone)]
pub struct MemorySinkRecord {
    pub statuses: Vec<String>,
    pub outcomes: Vec<MatchOutcome>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for inspecting the record from outside.
    pub fn handle(&self) -> Arc<Mutex<MemorySinkRecord>> {
        Arc::clone(&self.inner)
    }
}

impl StatusSink for MemorySink {
    fn status(&mut self, text: &str) {
        self.inner.lock().statuses.push(text.to_string());
    }

    fn decision(&mut self, outcome: &MatchOutcome) {
        self.inner.lock().outcomes.push(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_through_handle() {
        let sink = MemorySink::new();
        let handle = sink.handle();

        let mut boxed: Box<dyn StatusSink> = Box::new(sink);
        boxed.status("Calibrating...");
        boxed.decision(&MatchOutcome::NoReference);

        let record = handle.lock();
        assert_eq!(record.statuses, vec!["Calibrating...".to_string()]);
        assert_eq!(record.outcomes, vec![MatchOutcome::NoReference]);
    }
}
