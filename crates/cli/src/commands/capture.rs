//! Capture Command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use singlish_e2e::{capture_session, HarnessConfig};

use super::EXIT_CLEAN;
use crate::output::{print_info, print_success, print_warning};

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Fixture workbook to update in place
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

pub async fn execute(args: CaptureArgs, mut config: HarnessConfig) -> Result<i32> {
    if let Some(fixture) = args.fixture {
        config.paths.fixture = fixture;
    }

    let capture = capture_session(&config)
        .await
        .context("capture aborted")?;

    print_success(&format!("{} updated", config.paths.fixture.display()));
    print_info(&format!(
        "Summary: {} passed, {} failed out of {} tests",
        capture.passed,
        capture.failed,
        capture.passed + capture.failed
    ));
    if capture.skipped > 0 {
        print_warning(&format!("{} case(s) skipped for empty input", capture.skipped));
    }

    Ok(EXIT_CLEAN)
}
