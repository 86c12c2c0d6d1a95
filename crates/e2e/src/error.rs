//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Setup failed: {0}")]
    SetupFailure(String),

    #[error("WebDriver failed to start: {0}")]
    WebDriverStartup(String),

    #[error("WebDriver health check failed after {0} attempts")]
    WebDriverHealthCheck(usize),

    #[error("WebDriver error: {0}")]
    Driver(#[from] thirtyfour::error::WebDriverError),

    #[error("No element matches selector: {0}")]
    ElementNotFound(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Invalid test case: {0}")]
    Case(#[from] singlish_common::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<calamine::XlsxError> for E2eError {
    fn from(e: calamine::XlsxError) -> Self {
        E2eError::Spreadsheet(calamine::Error::Xlsx(e))
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
