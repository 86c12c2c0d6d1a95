//! Singlish E2E CLI
//!
//! Command-line entry points for running the harness, generating the
//! fixture workbook and capturing the site's current output.

pub mod commands;
pub mod output;
