//! Result recording and structured run events
//!
//! The recorder owns the result list and the [`RunSummary`] counters for a
//! run. Every state change is also published to an [`EventSink`] handed in
//! at construction, so console or log output never has to be threaded through
//! the execution code.
//!
//! Execution is sequential: one recorder per run, owned by the runner. A
//! runner that shards cases across browser sessions must serialize access to
//! it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::types::{RunSummary, Status, TestCase, TestResult};

/// Something that happened during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        total: usize,
    },
    CaseStarted {
        number: usize,
        total: usize,
        id: String,
        name: String,
    },
    CaseFinished {
        id: String,
        status: Status,
        elapsed_ms: u64,
        expected: String,
        actual: String,
        error: Option<String>,
    },
    Note {
        id: Option<String>,
        message: String,
    },
    RunFinished {
        summary: RunSummary,
    },
}

/// Receiver for run events
pub trait EventSink: Send {
    fn emit(&mut self, event: &RunEvent);
}

/// Forwards run events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &RunEvent) {
        match event {
            RunEvent::RunStarted { total } => info!("Loaded {} test cases", total),
            RunEvent::CaseStarted { number, total, id, name } => {
                info!("Test {}/{}: {} - {}", number, total, id, name);
            }
            RunEvent::CaseFinished { id, status, elapsed_ms, expected, actual, error: err } => {
                match status {
                    Status::Pass => info!(id = %id, elapsed_ms, "PASS"),
                    Status::Fail => warn!(
                        id = %id,
                        elapsed_ms,
                        expected = %expected,
                        actual = %actual,
                        "FAIL"
                    ),
                    Status::Error => error!(
                        id = %id,
                        elapsed_ms,
                        "ERROR: {}",
                        err.as_deref().unwrap_or("unknown error")
                    ),
                }
            }
            RunEvent::Note { id: Some(id), message } => info!(id = %id, "{}", message),
            RunEvent::Note { id: None, message } => info!("{}", message),
            RunEvent::RunFinished { summary } => info!(
                total = summary.total,
                passed = summary.passed,
                failed = summary.failed,
                errors = summary.errors,
                "Run finished: {:.2}% pass rate in {:.2}s",
                summary.pass_rate(),
                summary.duration().as_secs_f64()
            ),
        }
    }
}

/// Collects events in memory; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &RunEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Finished run: summary plus per-case results in execution order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub results: Vec<TestResult>,
}

impl RunReport {
    pub fn result_for(&self, id: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.case.id == id)
    }
}

/// Accumulates results and counters for one run
pub struct Recorder {
    summary: RunSummary,
    results: Vec<TestResult>,
    sink: Box<dyn EventSink>,
}

impl Recorder {
    /// Open a run of `total` cases
    pub fn new(total: usize, mut sink: Box<dyn EventSink>) -> Self {
        sink.emit(&RunEvent::RunStarted { total });
        Self {
            summary: RunSummary::new(total),
            results: Vec::with_capacity(total),
            sink,
        }
    }

    /// Announce that the case at 1-based position `number` is starting
    pub fn case_started(&mut self, number: usize, case: &TestCase) {
        self.sink.emit(&RunEvent::CaseStarted {
            number,
            total: self.summary.total,
            id: case.id.clone(),
            name: case.name.clone(),
        });
    }

    /// Free-form progress message
    pub fn note(&mut self, case: Option<&TestCase>, message: impl Into<String>) {
        self.sink.emit(&RunEvent::Note {
            id: case.map(|c| c.id.clone()),
            message: message.into(),
        });
    }

    /// Append a result and count it under its status
    pub fn record(
        &mut self,
        case: TestCase,
        actual_output: String,
        status: Status,
        elapsed: Duration,
        error: Option<String>,
        screenshot: Option<String>,
    ) -> &TestResult {
        let execution_time_ms = elapsed.as_millis() as u64;
        self.summary.count(status);
        self.sink.emit(&RunEvent::CaseFinished {
            id: case.id.clone(),
            status,
            elapsed_ms: execution_time_ms,
            expected: case.expected_output.clone(),
            actual: actual_output.clone(),
            error: error.clone(),
        });
        let index = self.results.len();
        self.results.push(TestResult {
            case,
            actual_output,
            status,
            execution_time_ms,
            error_message: error,
            screenshot_path: screenshot,
        });
        &self.results[index]
    }

    /// Attach a screenshot to the most recent result
    pub fn attach_screenshot(&mut self, path: String) {
        if let Some(last) = self.results.last_mut() {
            last.screenshot_path = Some(path);
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Stamp the end time and hand back the finished run
    pub fn finish(mut self) -> RunReport {
        self.summary.end_time = Some(chrono::Utc::now());
        self.sink.emit(&RunEvent::RunFinished {
            summary: self.summary.clone(),
        });
        RunReport {
            summary: self.summary,
            results: self.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str) -> TestCase {
        TestCase::new(id, "name", "input", "expected")
    }

    #[test]
    fn test_record_updates_counters() {
        let mut recorder = Recorder::new(3, Box::new(TracingSink));
        recorder.record(case("Pos_Fun_0001"), "expected".into(), Status::Pass, Duration::from_millis(12), None, None);
        recorder.record(case("Pos_Fun_0002"), "other".into(), Status::Fail, Duration::ZERO, None, None);
        recorder.record(
            case("Pos_Fun_0003"),
            String::new(),
            Status::Error,
            Duration::ZERO,
            Some("element detached".into()),
            None,
        );

        let report = recorder.finish();
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.total, report.summary.completed());
        assert!(report.summary.end_time.is_some());
        assert_eq!(report.results[0].execution_time_ms, 12);
        assert_eq!(
            report.result_for("Pos_Fun_0003").and_then(|r| r.error_message.as_deref()),
            Some("element detached")
        );
    }

    #[test]
    fn test_events_reach_sink() {
        let sink = MemorySink::new();
        let mut recorder = Recorder::new(1, Box::new(sink.clone()));
        let c = case("Neg_Fun_0001");
        recorder.case_started(1, &c);
        recorder.record(c, "x".into(), Status::Pass, Duration::ZERO, None, None);
        recorder.finish();

        let events = sink.events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], RunEvent::RunStarted { total: 1 });
        assert!(matches!(events[1], RunEvent::CaseStarted { number: 1, total: 1, .. }));
        assert!(matches!(&events[2], RunEvent::CaseFinished { status: Status::Pass, id, .. } if id == "Neg_Fun_0001"));
        assert!(matches!(&events[3], RunEvent::RunFinished { summary } if summary.passed == 1));
    }

    #[test]
    fn test_attach_screenshot() {
        let mut recorder = Recorder::new(1, Box::new(TracingSink));
        recorder.record(case("Pos_Fun_0001"), "x".into(), Status::Fail, Duration::ZERO, None, None);
        recorder.attach_screenshot("test-reports/screenshots/Pos_Fun_0001.png".into());
        assert_eq!(
            recorder.results()[0].screenshot_path.as_deref(),
            Some("test-reports/screenshots/Pos_Fun_0001.png")
        );
    }
}
