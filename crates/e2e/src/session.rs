//! End-to-end sessions: config -> webdriver -> browser -> fixture -> run -> reports

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use singlish_common::EventSink;

use crate::config::HarnessConfig;
use crate::driver::WebDriverPage;
use crate::error::E2eResult;
use crate::fixture;
use crate::report::{self, ReportContext};
use crate::runner::{CaptureOutcome, RunOutcome, RunnerConfig, TestRunner};
use crate::server::WebDriverProcess;

/// A finished run and the report files written for it
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub outcome: RunOutcome,
    pub written: Vec<PathBuf>,
}

/// Browser session plus the driver process backing it, if we spawned one
struct Connection {
    page: WebDriverPage,
    process: Option<WebDriverProcess>,
}

async fn connect(config: &HarnessConfig) -> E2eResult<Connection> {
    let process = match &config.webdriver.spawn {
        Some(spawn) => Some(WebDriverProcess::spawn(spawn).await?),
        None => None,
    };
    let url = process
        .as_ref()
        .map(|p| p.url().to_string())
        .unwrap_or_else(|| config.webdriver.url.clone());

    let page = WebDriverPage::launch(config, &url).await?;
    Ok(Connection { page, process })
}

async fn disconnect(page: WebDriverPage, process: Option<WebDriverProcess>) {
    if let Err(e) = page.close().await {
        warn!("Failed to close browser session: {}", e);
    }
    drop(process);
}

/// Run the fixture against the configured site and write every report
pub async fn run_session(config: &HarnessConfig, sink: Box<dyn EventSink>) -> E2eResult<SessionReport> {
    let sheets = fixture::read_sheets(&config.paths.fixture)?;
    let cases = fixture::parse_cases(fixture::cases_sheet(&sheets)?)?;
    info!("Running {} test case(s) against {}", cases.len(), config.target.url);

    let Connection { page, process } = connect(config).await?;
    let mut runner = TestRunner::new(page, RunnerConfig::from(config));
    let result = runner.run(&cases, sink).await;
    disconnect(runner.into_driver(), process).await;
    let outcome = result?;

    let ctx = ReportContext::from_config(config);
    let reports = report::emit(&outcome.report, &sheets, &ctx)?;
    let written = report::write_reports(&reports, &ctx)?;

    Ok(SessionReport { outcome, written })
}

/// Record the site's current output for every case back into the fixture
pub async fn capture_session(config: &HarnessConfig) -> E2eResult<CaptureOutcome> {
    let mut sheets = fixture::read_sheets(&config.paths.fixture)?;
    let cases = fixture::parse_cases(fixture::cases_sheet(&sheets)?)?;
    info!("Found {} test case(s) to process", cases.len());

    let Connection { page, process } = connect(config).await?;
    let mut runner = TestRunner::new(page, RunnerConfig::from(config));
    let result = runner.capture(&cases).await;
    disconnect(runner.into_driver(), process).await;
    let capture = result?;

    let outcomes: HashMap<_, _> = capture.outcomes.iter().cloned().collect();
    let updated = fixture::apply_outcomes(&mut sheets, &outcomes)?;
    fixture::write_sheets(&sheets, &config.paths.fixture)?;
    info!(
        "Updated {} row(s) in {}",
        updated,
        config.paths.fixture.display()
    );

    Ok(capture)
}
