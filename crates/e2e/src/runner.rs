//! Main test runner: selector discovery, sequential case execution, settling

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use singlish_common::compare::{evaluate, strict_match};
use singlish_common::{CaseKind, EventSink, Polarity, Recorder, RunReport, Status, TestCase};

use crate::config::{HarnessConfig, SelectorConfig, SettlePolicy, TimingConfig};
use crate::driver::{locate_first, PageDriver};
use crate::error::{E2eError, E2eResult};
use crate::fixture::Outcome;

pub const REALTIME_VERIFIED: &str = "Real-time update verified";
pub const REALTIME_MISSING: &str = "No real-time update detected";
pub const CLEAR_VERIFIED: &str = "Clear functionality verified";
pub const CLEAR_FAILED: &str = "Clear functionality failed";

/// Selectors chosen by discovery for this page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    pub input: String,
    pub output: String,
}

/// Finished run plus the selectors it ran against
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub selectors: PageSelectors,
}

/// Result of a capture pass over the fixture
#[derive(Debug, Clone, Default)]
pub struct CaptureOutcome {
    pub outcomes: Vec<(String, Outcome)>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub timing: TimingConfig,
    pub selectors: SelectorConfig,
    pub screenshot_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            selectors: SelectorConfig::default(),
            screenshot_dir: PathBuf::from("test-reports/screenshots"),
        }
    }
}

impl From<&HarnessConfig> for RunnerConfig {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            timing: config.timing.clone(),
            selectors: config.selectors.clone(),
            screenshot_dir: config.paths.screenshot_dir.clone(),
        }
    }
}

/// What a single case produced before it is recorded
struct CaseOutcome {
    actual: String,
    status: Status,
}

/// Drives one page through a list of cases
pub struct TestRunner<D: PageDriver> {
    driver: D,
    config: RunnerConfig,
}

impl<D: PageDriver> TestRunner<D> {
    pub fn new(driver: D, config: RunnerConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Hand the page back, e.g. to close the session
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Find input and output elements; fails before any case runs
    pub async fn discover(&mut self) -> E2eResult<PageSelectors> {
        let input = locate_first(&mut self.driver, &self.config.selectors.input)
            .await?
            .ok_or_else(|| {
                E2eError::SetupFailure(
                    "could not find an input element on the page; the site layout may have changed"
                        .into(),
                )
            })?
            .to_string();
        let output = locate_first(&mut self.driver, &self.config.selectors.output)
            .await?
            .ok_or_else(|| {
                E2eError::SetupFailure(
                    "could not find an output element on the page; the site layout may have changed"
                        .into(),
                )
            })?
            .to_string();

        info!("Input selector: {}", input);
        info!("Output selector: {}", output);
        Ok(PageSelectors { input, output })
    }

    /// Execute every case in order and record the results
    pub async fn run(&mut self, cases: &[TestCase], sink: Box<dyn EventSink>) -> E2eResult<RunOutcome> {
        let selectors = self.discover().await?;
        let mut recorder = Recorder::new(cases.len(), sink);
        let ceiling = self.config.timing.case_timeout();

        for (index, case) in cases.iter().enumerate() {
            recorder.case_started(index + 1, case);
            let start = Instant::now();

            let executed = timeout(ceiling, self.execute(case, &selectors, index == 0)).await;
            let (actual, status, error) = match executed {
                Ok(Ok(outcome)) => (outcome.actual, outcome.status, None),
                Ok(Err(e)) => (String::new(), Status::Error, Some(e.to_string())),
                Err(_) => (
                    String::new(),
                    Status::Error,
                    Some(format!("timed out after {} ms", ceiling.as_millis())),
                ),
            };

            let screenshot = if status == Status::Fail {
                self.failure_screenshot(case, &mut recorder).await
            } else {
                None
            };

            recorder.record(case.clone(), actual, status, start.elapsed(), error, screenshot);
        }

        Ok(RunOutcome {
            report: recorder.finish(),
            selectors,
        })
    }

    async fn execute(
        &mut self,
        case: &TestCase,
        selectors: &PageSelectors,
        first: bool,
    ) -> E2eResult<CaseOutcome> {
        self.driver.clear(&selectors.input).await?;
        sleep(self.config.timing.clear_delay()).await;

        match case.kind() {
            CaseKind::Functional(polarity) => self.functional(case, selectors, polarity, first).await,
            CaseKind::RealTimeUpdate => {
                let updated = self.realtime_updates(&case.input, selectors).await? > 0;
                Ok(CaseOutcome {
                    actual: if updated { REALTIME_VERIFIED } else { REALTIME_MISSING }.to_string(),
                    status: Status::from_comparison(updated),
                })
            }
            CaseKind::ClearInput => {
                let cleared = self.clear_via_button(&case.input, selectors).await?;
                Ok(CaseOutcome {
                    actual: if cleared { CLEAR_VERIFIED } else { CLEAR_FAILED }.to_string(),
                    status: Status::from_comparison(cleared),
                })
            }
            CaseKind::Unrecognised => Err(E2eError::Fixture(format!(
                "unrecognised test case id '{}': expected a Pos_Fun, Neg_Fun or Pos_UI prefix",
                case.id
            ))),
        }
    }

    async fn functional(
        &mut self,
        case: &TestCase,
        selectors: &PageSelectors,
        polarity: Polarity,
        first: bool,
    ) -> E2eResult<CaseOutcome> {
        self.driver.fill(&selectors.input, &case.input).await?;
        let raw = self.settle(&selectors.output, first).await?;
        let status = evaluate(&raw, &case.expected_output, polarity);
        if status == Status::Fail {
            debug!(
                "{} expected {:?}, got {:?}",
                case.id, case.expected_output, raw
            );
        }
        Ok(CaseOutcome {
            actual: raw.trim().to_string(),
            status,
        })
    }

    /// Wait for the page to render output, per the configured policy
    async fn settle(&mut self, output: &str, first: bool) -> E2eResult<String> {
        match self.config.timing.settle.clone() {
            SettlePolicy::FixedDelay {
                first_case_ms,
                per_case_ms,
                read_interval_ms,
                max_reads,
            } => {
                let warmup = if first { first_case_ms } else { per_case_ms };
                sleep(Duration::from_millis(warmup)).await;

                let mut text = String::new();
                for _ in 0..max_reads {
                    sleep(Duration::from_millis(read_interval_ms)).await;
                    text = self.driver.read_text(output).await?;
                    if !text.trim().is_empty() {
                        break;
                    }
                }
                Ok(text)
            }
            SettlePolicy::PollUntilStable {
                interval_ms,
                stable_reads,
                timeout_ms,
            } => {
                let deadline = Instant::now() + Duration::from_millis(timeout_ms);
                let mut last = String::new();
                let mut streak = 0u32;
                loop {
                    let text = self.driver.read_text(output).await?;
                    streak = if text.trim().is_empty() {
                        0
                    } else if text == last {
                        streak + 1
                    } else {
                        1
                    };
                    last = text;

                    if streak >= stable_reads {
                        return Ok(last);
                    }
                    if Instant::now() >= deadline {
                        debug!("Output did not stabilise within {} ms", timeout_ms);
                        return Ok(last);
                    }
                    sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    /// Type `input` one character at a time and count output changes
    async fn realtime_updates(&mut self, input: &str, selectors: &PageSelectors) -> E2eResult<usize> {
        let mut previous = String::new();
        let mut updates = 0;

        for ch in input.chars() {
            self.driver.type_char(&selectors.input, ch).await?;
            sleep(self.config.timing.keystroke_delay()).await;

            let current = self.driver.read_text(&selectors.output).await?;
            if !current.is_empty() && current != previous {
                updates += 1;
                previous = current;
            }
        }

        sleep(self.config.timing.clear_delay() * 2).await;
        let last = self.driver.read_text(&selectors.output).await?;
        if !last.is_empty() && last != previous {
            updates += 1;
        }

        if updates > 0 {
            info!("Real-time updates detected: {} times", updates);
        } else {
            warn!("No real-time updates detected; final output {:?}", last);
        }
        Ok(updates)
    }

    /// Fill the input, then click clear-like buttons until the input is empty
    async fn clear_via_button(&mut self, input: &str, selectors: &PageSelectors) -> E2eResult<bool> {
        self.driver.fill(&selectors.input, input).await?;
        sleep(self.config.timing.clear_delay() * 2).await;

        let labels = self.driver.button_labels().await?;
        for (index, label) in labels.iter().enumerate() {
            if !is_clear_label(label) {
                continue;
            }
            self.driver.click_button(index).await?;
            sleep(self.config.timing.clear_delay()).await;

            if self.driver.input_value(&selectors.input).await?.is_empty() {
                return Ok(true);
            }
        }

        warn!("Clear button not found or not working");
        Ok(false)
    }

    /// Screenshot for a failed case; a failed capture is logged and skipped
    async fn failure_screenshot(&mut self, case: &TestCase, recorder: &mut Recorder) -> Option<String> {
        let path = self.config.screenshot_dir.join(format!("{}.png", case.id));
        match self.driver.screenshot(&path).await {
            Ok(()) => Some(path.display().to_string()),
            Err(e) => {
                recorder.note(Some(case), format!("screenshot failed: {}", e));
                None
            }
        }
    }

    /// Observe every case and compare outputs with strict equality.
    ///
    /// Cases with an empty input are skipped; a case whose output cannot be
    /// read is recorded as `ERROR` / `Fail`.
    pub async fn capture(&mut self, cases: &[TestCase]) -> E2eResult<CaptureOutcome> {
        let selectors = self.discover().await?;
        let mut capture = CaptureOutcome::default();

        for (index, case) in cases.iter().enumerate() {
            if case.input.is_empty() {
                info!("Skipping {} - no input", case.id);
                capture.skipped += 1;
                continue;
            }
            info!("Processing {}: {:?}", case.id, case.input);

            let observed = self.observe(case, &selectors, index == 0).await;
            let outcome = match observed {
                Ok(actual) => {
                    let status = Status::from_comparison(strict_match(&actual, &case.expected_output));
                    Outcome {
                        actual,
                        status: status.to_string(),
                    }
                }
                Err(e) => {
                    warn!("Error processing {}: {}", case.id, e);
                    Outcome {
                        actual: "ERROR".to_string(),
                        status: Status::Fail.to_string(),
                    }
                }
            };

            if outcome.status == Status::Pass.as_str() {
                capture.passed += 1;
            } else {
                capture.failed += 1;
            }
            capture.outcomes.push((case.id.clone(), outcome));
        }

        Ok(capture)
    }

    async fn observe(&mut self, case: &TestCase, selectors: &PageSelectors, first: bool) -> E2eResult<String> {
        self.driver.clear(&selectors.input).await?;
        sleep(self.config.timing.clear_delay()).await;
        self.driver.fill(&selectors.input, &case.input).await?;
        let text = self.settle(&selectors.output, first).await?;
        Ok(text.trim().to_string())
    }
}

/// Button labels that plausibly clear the input
pub fn is_clear_label(label: &str) -> bool {
    let label = label.trim();
    label.to_lowercase().contains("clear") || label == "×" || label == "X"
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Clear", true; "word")]
    #[test_case("  clear all ", true; "lowercase with padding")]
    #[test_case("×", true; "multiplication sign")]
    #[test_case("X", true; "capital x")]
    #[test_case("x", false; "lowercase x")]
    #[test_case("Copy", false; "other button")]
    fn test_is_clear_label(label: &str, expected: bool) {
        assert_eq!(is_clear_label(label), expected);
    }
}
