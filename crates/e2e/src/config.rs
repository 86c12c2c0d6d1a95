//! Harness configuration
//!
//! Loaded from an optional TOML file; every field has a default so a bare
//! `singlish-test` invocation runs against the public site with the stock
//! fixture paths.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "singlish-test.toml";

/// Top-level harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub target: TargetConfig,
    pub webdriver: WebDriverConfig,
    pub timing: TimingConfig,
    pub selectors: SelectorConfig,
    pub paths: PathsConfig,
}

/// The site under test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Page that hosts the transliterator
    pub url: String,

    /// Navigation timeout
    pub load_timeout_ms: u64,

    /// Selector that must match before selector discovery starts
    pub ready_selector: String,

    /// How long to wait for `ready_selector`
    pub ready_timeout_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: "https://www.swifttranslator.com/".to_string(),
            load_timeout_ms: 30_000,
            ready_selector: r#"textarea, input[type="text"]"#.to_string(),
            ready_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        }
    }
}

/// WebDriver session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebDriverConfig {
    /// WebDriver endpoint (chromedriver / geckodriver)
    pub url: String,

    pub browser: Browser,

    pub headless: bool,

    pub viewport_width: u32,

    pub viewport_height: u32,

    /// Launch the driver binary ourselves instead of connecting to a running one
    pub spawn: Option<SpawnConfig>,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9515".to_string(),
            browser: Browser::Chrome,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            spawn: None,
        }
    }
}

/// How to launch a local driver process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Driver binary, resolved through `PATH` when relative
    pub binary: PathBuf,

    /// Port to listen on (None = find free port)
    pub port: Option<u16>,

    pub startup_timeout_ms: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("chromedriver"),
            port: None,
            startup_timeout_ms: 30_000,
        }
    }
}

/// How long to wait for the page to render output after input changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SettlePolicy {
    /// Sleep a fixed time, then re-read until the output is non-blank
    FixedDelay {
        first_case_ms: u64,
        per_case_ms: u64,
        read_interval_ms: u64,
        max_reads: u32,
    },
    /// Read repeatedly until the output stops changing or the timeout hits
    PollUntilStable {
        interval_ms: u64,
        stable_reads: u32,
        timeout_ms: u64,
    },
}

impl Default for SettlePolicy {
    fn default() -> Self {
        SettlePolicy::FixedDelay {
            first_case_ms: 3_000,
            per_case_ms: 2_000,
            read_interval_ms: 1_000,
            max_reads: 5,
        }
    }
}

/// Pauses and ceilings used while executing cases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause after clearing the input
    pub clear_delay_ms: u64,

    /// Pause after each keystroke in the real-time check
    pub keystroke_delay_ms: u64,

    /// Wall-clock ceiling for a single case
    pub case_timeout_ms: u64,

    pub settle: SettlePolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clear_delay_ms: 500,
            keystroke_delay_ms: 500,
            case_timeout_ms: 60_000,
            settle: SettlePolicy::default(),
        }
    }
}

impl TimingConfig {
    /// No pauses at all; for driving in-memory pages
    pub fn immediate() -> Self {
        Self {
            clear_delay_ms: 0,
            keystroke_delay_ms: 0,
            case_timeout_ms: 5_000,
            settle: SettlePolicy::FixedDelay {
                first_case_ms: 0,
                per_case_ms: 0,
                read_interval_ms: 0,
                max_reads: 1,
            },
        }
    }

    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    pub fn keystroke_delay(&self) -> Duration {
        Duration::from_millis(self.keystroke_delay_ms)
    }

    pub fn case_timeout(&self) -> Duration {
        Duration::from_millis(self.case_timeout_ms)
    }
}

/// Ordered CSS candidates probed during selector discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub input: Vec<String>,
    pub output: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            input: [
                "textarea",
                r#"input[type="text"]"#,
                r#"input[name*="text"]"#,
                r#"input[name*="input"]"#,
                r#"[contenteditable="true"]"#,
                ".input-field",
                "#input",
                "#text",
                r#"[aria-label*="input"]"#,
                r#"[placeholder*="Type"]"#,
            ]
            .map(String::from)
            .to_vec(),
            output: [
                "div.w-full.h-80.bg-slate-50.whitespace-pre-wrap",
                r#"div[class*="output"]"#,
                r#"div[class*="result"]"#,
                r#"div[id*="output"]"#,
                r#"div[id*="result"]"#,
                ".output-field",
                "#output",
                "#result",
                r#"[aria-label*="output"]"#,
                r#"[class*="translat"]"#,
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Fixture and report locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub fixture: PathBuf,
    pub results_dir: PathBuf,
    pub screenshot_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fixture: PathBuf::from("test-data/test-cases.xlsx"),
            results_dir: PathBuf::from("results"),
            screenshot_dir: PathBuf::from("test-reports/screenshots"),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> E2eResult<Self> {
        let config = if path.exists() {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> E2eResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `SINGLISH_*` environment overrides
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> E2eResult<()> {
        if let Some(url) = lookup("SINGLISH_TARGET_URL") {
            self.target.url = url;
        }
        if let Some(url) = lookup("SINGLISH_WEBDRIVER_URL") {
            self.webdriver.url = url;
        }
        if let Some(value) = lookup("SINGLISH_HEADLESS") {
            self.webdriver.headless = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(E2eError::Config(format!(
                        "SINGLISH_HEADLESS must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }
        self.validate()
    }

    pub fn validate(&self) -> E2eResult<()> {
        if self.target.url.trim().is_empty() {
            return Err(E2eError::Config("target.url must not be empty".into()));
        }
        if self.selectors.input.is_empty() || self.selectors.output.is_empty() {
            return Err(E2eError::Config(
                "selectors.input and selectors.output need at least one candidate".into(),
            ));
        }
        if self.timing.case_timeout_ms == 0 {
            return Err(E2eError::Config("timing.case_timeout_ms must be positive".into()));
        }
        match &self.timing.settle {
            SettlePolicy::FixedDelay { max_reads: 0, .. } => Err(E2eError::Config(
                "timing.settle.max_reads must be at least 1".into(),
            )),
            SettlePolicy::PollUntilStable { stable_reads: 0, .. } => Err(E2eError::Config(
                "timing.settle.stable_reads must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn results_workbook(&self) -> PathBuf {
        self.paths.results_dir.join("test-results.xlsx")
    }

    pub fn html_report(&self) -> PathBuf {
        self.paths.results_dir.join("execution-report.html")
    }

    pub fn text_summary(&self) -> PathBuf {
        self.paths.results_dir.join("execution-summary.txt")
    }

    pub fn json_results(&self) -> PathBuf {
        self.paths.results_dir.join("test-results.json")
    }
}
