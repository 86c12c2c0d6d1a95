//! Generate Command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use singlish_common::catalog::{builtin_cases, Coverage};
use singlish_e2e::config::DEFAULT_CONFIG_FILE;
use singlish_e2e::{fixture, HarnessConfig};

use super::EXIT_CLEAN;
use crate::output::{print_info, print_success};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Where to write the workbook (defaults to the configured fixture path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the effective configuration to singlish-test.toml
    #[arg(long)]
    pub write_config: bool,
}

pub fn execute(args: GenerateArgs, config: &HarnessConfig) -> Result<i32> {
    let path = args.output.unwrap_or_else(|| config.paths.fixture.clone());
    let cases = builtin_cases();

    fixture::generate_fixture(&cases, &path)
        .with_context(|| format!("failed to write fixture {}", path.display()))?;

    let coverage = Coverage::of(&cases);
    print_success(&format!("Fixture written to {}", path.display()));
    print_info(&format!(
        "{} cases: {} positive, {} negative, {} UI",
        cases.len(),
        coverage.positive,
        coverage.negative,
        coverage.ui
    ));

    if args.write_config {
        let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        config
            .save(&config_path)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        print_success(&format!("Configuration written to {}", config_path.display()));
    }

    Ok(EXIT_CLEAN)
}
