//! Run Command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use singlish_common::TracingSink;
use singlish_e2e::{run_session, HarnessConfig};

use super::{EXIT_CLEAN, EXIT_FAILURES};
use crate::output::{self, OutputFormat};

/// Overrides for a single run
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Fixture workbook to read cases from
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Site under test
    #[arg(long)]
    pub url: Option<String>,

    /// Directory for the result files
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

impl RunArgs {
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(fixture) = &self.fixture {
            config.paths.fixture = fixture.clone();
        }
        if let Some(url) = &self.url {
            config.target.url = url.clone();
        }
        if let Some(dir) = &self.results_dir {
            config.paths.results_dir = dir.clone();
        }
        if self.headed {
            config.webdriver.headless = false;
        }
    }
}

pub async fn execute(args: RunArgs, mut config: HarnessConfig, format: OutputFormat) -> Result<i32> {
    args.apply(&mut config);

    let session = run_session(&config, Box::new(TracingSink))
        .await
        .context("test run aborted")?;
    let report = &session.outcome.report;

    output::print_results(&report.results, format);
    output::print_run_summary(&report.summary, &session.written);

    Ok(if report.summary.is_clean() {
        EXIT_CLEAN
    } else {
        EXIT_FAILURES
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let args = RunArgs {
            fixture: Some(PathBuf::from("cases.xlsx")),
            url: Some("http://localhost:3000".into()),
            results_dir: None,
            headed: true,
        };
        let mut config = HarnessConfig::default();
        args.apply(&mut config);

        assert_eq!(config.paths.fixture, PathBuf::from("cases.xlsx"));
        assert_eq!(config.target.url, "http://localhost:3000");
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
        assert!(!config.webdriver.headless);
    }

    #[test]
    fn test_default_args_change_nothing() {
        let mut config = HarnessConfig::default();
        RunArgs::default().apply(&mut config);
        assert!(config.webdriver.headless);
        assert_eq!(config.paths.fixture, PathBuf::from("test-data/test-cases.xlsx"));
    }
}
