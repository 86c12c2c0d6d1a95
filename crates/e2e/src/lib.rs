//! Singlish E2E test framework
//!
//! This crate drives a Singlish to Sinhala transliteration website through
//! WebDriver and checks the rendered output against a spreadsheet fixture:
//! - Reads cases from the `"Test cases"` sheet of an `.xlsx` workbook
//! - Discovers the page's input/output elements by probing CSS candidates
//! - Executes cases sequentially with a configurable settle policy
//! - Writes results as a workbook, an HTML page, a text summary and JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  run_session(config)                                        │
//! │    ├── fixture::read_sheets() -> [Sheet]                    │
//! │    ├── WebDriverProcess::spawn() (optional)                 │
//! │    ├── WebDriverPage::launch() -> impl PageDriver           │
//! │    ├── TestRunner::run(cases) -> RunOutcome                 │
//! │    │     ├── discover() -> PageSelectors                    │
//! │    │     └── per case: clear, fill, settle, read, compare   │
//! │    └── report::emit() + write_reports()                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod server;
pub mod session;

pub use config::{HarnessConfig, SettlePolicy};
pub use driver::{locate_first, PageDriver, WebDriverPage};
pub use error::{E2eError, E2eResult};
pub use runner::{PageSelectors, RunOutcome, RunnerConfig, TestRunner};
pub use session::{capture_session, run_session, SessionReport};
