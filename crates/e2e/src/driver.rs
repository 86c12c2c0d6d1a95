//! Browser automation boundary
//!
//! The runner talks to the page only through [`PageDriver`]. The production
//! implementation drives a WebDriver session; tests substitute an in-memory
//! page.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::time::{Duration, Instant};
use thirtyfour::prelude::*;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{Browser, HarnessConfig};
use crate::error::{E2eError, E2eResult};

/// Operations the runner needs from a rendered page
#[async_trait]
pub trait PageDriver: Send {
    /// Number of elements matching `selector`
    async fn count(&mut self, selector: &str) -> E2eResult<usize>;

    /// Replace the content of the first match with `text`
    async fn fill(&mut self, selector: &str, text: &str) -> E2eResult<()>;

    /// Empty the first match
    async fn clear(&mut self, selector: &str) -> E2eResult<()>;

    /// Rendered text of the first match
    async fn read_text(&mut self, selector: &str) -> E2eResult<String>;

    /// Append a single keystroke to the first match
    async fn type_char(&mut self, selector: &str, ch: char) -> E2eResult<()>;

    /// Form value of the first match
    async fn input_value(&mut self, selector: &str) -> E2eResult<String>;

    /// Visible labels of every `<button>` on the page, in document order
    async fn button_labels(&mut self) -> E2eResult<Vec<String>>;

    /// Click the button at `index` in [`PageDriver::button_labels`] order
    async fn click_button(&mut self, index: usize) -> E2eResult<()>;

    /// Save a PNG of the viewport
    async fn screenshot(&mut self, path: &Path) -> E2eResult<()>;
}

/// Return the first candidate that matches at least one element
pub async fn locate_first<'a, D>(driver: &mut D, candidates: &'a [String]) -> E2eResult<Option<&'a str>>
where
    D: PageDriver + ?Sized,
{
    for candidate in candidates {
        let matches = driver.count(candidate).await?;
        debug!("Selector {} matched {} element(s)", candidate, matches);
        if matches > 0 {
            return Ok(Some(candidate.as_str()));
        }
    }
    Ok(None)
}

/// Sets the value through the native setter so framework-controlled inputs
/// observe the change, then fires `input`.
const CLEAR_SCRIPT: &str = r#"
const el = arguments[0];
if (el.isContentEditable) {
    el.textContent = '';
} else {
    const proto = el instanceof HTMLTextAreaElement
        ? HTMLTextAreaElement.prototype
        : HTMLInputElement.prototype;
    const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
    setter.call(el, '');
}
el.dispatchEvent(new Event('input', { bubbles: true }));
return true;
"#;

const INPUT_VALUE_SCRIPT: &str = r#"
const el = arguments[0];
return el.isContentEditable ? el.textContent : (el.value ?? '');
"#;

/// [`PageDriver`] over a live WebDriver session
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    /// Start a browser session and open the target page
    pub async fn launch(config: &HarnessConfig, webdriver_url: &str) -> E2eResult<Self> {
        let wd = &config.webdriver;
        let driver = match wd.browser {
            Browser::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if wd.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(webdriver_url, caps).await
            }
            Browser::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if wd.headless {
                    caps.set_headless()?;
                }
                WebDriver::new(webdriver_url, caps).await
            }
        }
        .map_err(|e| {
            E2eError::SetupFailure(format!(
                "could not start {} session at {}: {}",
                wd.browser.as_str(),
                webdriver_url,
                e
            ))
        })?;

        info!("Connected to {} WebDriver at {}", wd.browser.as_str(), webdriver_url);

        let page = Self { driver };
        page.driver
            .set_window_rect(0, 0, wd.viewport_width, wd.viewport_height)
            .await?;
        page.driver
            .set_page_load_timeout(Duration::from_millis(config.target.load_timeout_ms))
            .await?;

        info!("Navigating to {}", config.target.url);
        page.driver.goto(&config.target.url).await?;
        page.wait_for_selector(
            &config.target.ready_selector,
            Duration::from_millis(config.target.ready_timeout_ms),
        )
        .await?;

        Ok(page)
    }

    /// Poll until `selector` matches something
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        let start = Instant::now();
        loop {
            if !self.driver.find_all(By::Css(selector)).await?.is_empty() {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(E2eError::Timeout(format!(
                    "selector '{}' after {} ms",
                    selector,
                    timeout.as_millis()
                )));
            }
            sleep(Duration::from_millis(100)).await;
        }
    }

    /// End the browser session
    pub async fn close(self) -> E2eResult<()> {
        self.driver.quit().await?;
        Ok(())
    }

    async fn first(&self, selector: &str) -> E2eResult<WebElement> {
        self.driver
            .find_all(By::Css(selector))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| E2eError::ElementNotFound(selector.to_string()))
    }

    async fn buttons(&self) -> E2eResult<Vec<WebElement>> {
        Ok(self.driver.find_all(By::Css("button")).await?)
    }
}

#[async_trait]
impl PageDriver for WebDriverPage {
    async fn count(&mut self, selector: &str) -> E2eResult<usize> {
        Ok(self.driver.find_all(By::Css(selector)).await?.len())
    }

    async fn fill(&mut self, selector: &str, text: &str) -> E2eResult<()> {
        self.clear(selector).await?;
        let element = self.first(selector).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn clear(&mut self, selector: &str) -> E2eResult<()> {
        let element = self.first(selector).await?;
        self.driver.execute(CLEAR_SCRIPT, vec![element.to_json()?]).await?;
        Ok(())
    }

    async fn read_text(&mut self, selector: &str) -> E2eResult<String> {
        let element = self.first(selector).await?;
        Ok(element.text().await?)
    }

    async fn type_char(&mut self, selector: &str, ch: char) -> E2eResult<()> {
        let element = self.first(selector).await?;
        element.send_keys(ch.to_string()).await?;
        Ok(())
    }

    async fn input_value(&mut self, selector: &str) -> E2eResult<String> {
        let element = self.first(selector).await?;
        let ret = self
            .driver
            .execute(INPUT_VALUE_SCRIPT, vec![element.to_json()?])
            .await?;
        Ok(match ret.json() {
            JsonValue::String(s) => s.clone(),
            _ => String::new(),
        })
    }

    async fn button_labels(&mut self) -> E2eResult<Vec<String>> {
        let mut labels = Vec::new();
        for button in self.buttons().await? {
            labels.push(button.text().await?);
        }
        Ok(labels)
    }

    async fn click_button(&mut self, index: usize) -> E2eResult<()> {
        let button = self
            .buttons()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| E2eError::ElementNotFound(format!("button #{}", index)))?;
        button.click().await?;
        Ok(())
    }

    async fn screenshot(&mut self, path: &Path) -> E2eResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.driver.screenshot(path).await?;
        Ok(())
    }
}
