//! Singlish E2E common library
//!
//! Test-case model, output normalization, polarity-aware comparison and
//! result recording shared by the browser runner and the CLI.

pub mod catalog;
pub mod compare;
pub mod error;
pub mod normalize;
pub mod recorder;
pub mod types;

pub use compare::{compare, evaluate};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use recorder::{EventSink, MemorySink, Recorder, RunEvent, RunReport, TracingSink};
pub use types::*;

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
