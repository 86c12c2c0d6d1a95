//! CLI Commands

pub mod capture;
pub mod generate;
pub mod run;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use singlish_e2e::config::DEFAULT_CONFIG_FILE;
use singlish_e2e::HarnessConfig;

/// Exit code for a run that completed without failures or errors
pub const EXIT_CLEAN: i32 = 0;
/// Exit code for a run that completed with failures or errors
pub const EXIT_FAILURES: i32 = 1;
/// Exit code for setup, I/O or configuration failures
pub const EXIT_FATAL: i32 = 2;

/// Load the config file (or defaults) and apply environment overrides
pub fn load_config(path: Option<&Path>) -> Result<HarnessConfig> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = HarnessConfig::load(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    config
        .apply_env()
        .context("invalid SINGLISH_* environment override")?;
    Ok(config)
}
