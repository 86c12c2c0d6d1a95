//! In-memory page used by the runner tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use singlish_e2e::config::{SelectorConfig, TimingConfig};
use singlish_e2e::{E2eError, E2eResult, PageDriver, RunnerConfig};

pub const INPUT: &str = "textarea";
pub const OUTPUT: &str = "div.w-full.h-80.bg-slate-50.whitespace-pre-wrap";

type Renderer = Box<dyn Fn(&str) -> String + Send>;

/// A single-input, single-output page whose output is `render(input)`
pub struct FakePage {
    elements: HashSet<String>,
    input: String,
    render: Renderer,
    buttons: Vec<String>,
    clear_button_works: bool,
    failing_reads: HashSet<String>,
    hanging_reads: HashSet<String>,
    fail_screenshots: bool,
    pub screenshots: Vec<PathBuf>,
    pub fills: Vec<String>,
    pub clears: usize,
    pub reads: usize,
}

impl FakePage {
    /// Page with the stock textarea and output div
    pub fn new() -> Self {
        Self::with_elements(&[INPUT, OUTPUT])
    }

    pub fn with_elements(selectors: &[&str]) -> Self {
        Self {
            elements: selectors.iter().map(|s| s.to_string()).collect(),
            input: String::new(),
            render: Box::new(|_| String::new()),
            buttons: Vec::new(),
            clear_button_works: true,
            failing_reads: HashSet::new(),
            hanging_reads: HashSet::new(),
            fail_screenshots: false,
            screenshots: Vec::new(),
            fills: Vec::new(),
            clears: 0,
            reads: 0,
        }
    }

    /// Output is looked up from a fixed table, blank for unknown input
    pub fn translating(mut self, table: &[(&str, &str)]) -> Self {
        let table: HashMap<String, String> = table
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.render = Box::new(move |input| table.get(input).cloned().unwrap_or_default());
        self
    }

    pub fn rendering(mut self, render: impl Fn(&str) -> String + Send + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    pub fn with_buttons(mut self, labels: &[&str], clear_works: bool) -> Self {
        self.buttons = labels.iter().map(|s| s.to_string()).collect();
        self.clear_button_works = clear_works;
        self
    }

    /// Reading the output fails while the input equals `input`
    pub fn failing_read_for(mut self, input: &str) -> Self {
        self.failing_reads.insert(input.to_string());
        self
    }

    /// Reading the output never returns while the input equals `input`
    pub fn hanging_read_for(mut self, input: &str) -> Self {
        self.hanging_reads.insert(input.to_string());
        self
    }

    pub fn failing_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    fn require(&self, selector: &str) -> E2eResult<()> {
        if self.elements.contains(selector) {
            Ok(())
        } else {
            Err(E2eError::ElementNotFound(selector.to_string()))
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn count(&mut self, selector: &str) -> E2eResult<usize> {
        Ok(usize::from(self.elements.contains(selector)))
    }

    async fn fill(&mut self, selector: &str, text: &str) -> E2eResult<()> {
        self.require(selector)?;
        self.input = text.to_string();
        self.fills.push(text.to_string());
        Ok(())
    }

    async fn clear(&mut self, selector: &str) -> E2eResult<()> {
        self.require(selector)?;
        self.input.clear();
        self.clears += 1;
        Ok(())
    }

    async fn read_text(&mut self, selector: &str) -> E2eResult<String> {
        self.require(selector)?;
        self.reads += 1;
        if self.hanging_reads.contains(&self.input) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing_reads.contains(&self.input) {
            return Err(E2eError::ElementNotFound(selector.to_string()));
        }
        Ok((self.render)(&self.input))
    }

    async fn type_char(&mut self, selector: &str, ch: char) -> E2eResult<()> {
        self.require(selector)?;
        self.input.push(ch);
        Ok(())
    }

    async fn input_value(&mut self, selector: &str) -> E2eResult<String> {
        self.require(selector)?;
        Ok(self.input.clone())
    }

    async fn button_labels(&mut self) -> E2eResult<Vec<String>> {
        Ok(self.buttons.clone())
    }

    async fn click_button(&mut self, index: usize) -> E2eResult<()> {
        let label = self
            .buttons
            .get(index)
            .ok_or_else(|| E2eError::ElementNotFound(format!("button #{}", index)))?;
        if self.clear_button_works && singlish_e2e::runner::is_clear_label(label) {
            self.input.clear();
        }
        Ok(())
    }

    async fn screenshot(&mut self, path: &Path) -> E2eResult<()> {
        if self.fail_screenshots {
            return Err(E2eError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "screenshot unavailable",
            )));
        }
        self.screenshots.push(path.to_path_buf());
        Ok(())
    }
}

/// Runner settings with every pause set to zero
pub fn instant_config() -> RunnerConfig {
    RunnerConfig {
        timing: TimingConfig::immediate(),
        selectors: SelectorConfig::default(),
        screenshot_dir: PathBuf::from("shots"),
    }
}
