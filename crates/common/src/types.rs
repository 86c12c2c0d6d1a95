//! Core types for test cases, results and run summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Input length bucket recorded in the fixture (`S` ≤ 30 chars, `M` 31–299, `L` ≥ 300)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthClass {
    S,
    M,
    L,
}

impl LengthClass {
    /// Parse a fixture cell such as `"S"`, `"m"` or `"L (≥ 300 characters)"`
    pub fn parse(id: &str, value: &str) -> Result<Self> {
        match value.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('S') => Ok(Self::S),
            Some('M') => Ok(Self::M),
            Some('L') => Ok(Self::L),
            _ => Err(Error::InvalidLength {
                id: id.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Bucket a raw input by its character count
    pub fn for_input(input: &str) -> Self {
        match input.chars().count() {
            0..=30 => Self::S,
            31..=299 => Self::M,
            _ => Self::L,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the site is expected to reproduce the recorded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Output must match the expectation after normalization
    Positive,
    /// Input probes a known weakness; output must deviate from the literal expectation
    Negative,
}

/// How a case is executed against the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Fill the input, read the output, compare
    Functional(Polarity),
    /// Type character by character and watch the output change
    RealTimeUpdate,
    /// Fill the input and verify a clear button empties it
    ClearInput,
    /// Id prefix follows none of the known conventions
    Unrecognised,
}

impl CaseKind {
    /// Derive the kind from the id convention (`Pos_Fun_*`, `Neg_Fun_*`, `Pos_UI_*`)
    /// and, for UI cases, from the case name.
    pub fn classify(id: &str, name: &str) -> Self {
        let name = name.to_lowercase();
        let is_ui = id.contains("_UI_") || id.starts_with("UI_");

        if is_ui && name.contains("clear") {
            return Self::ClearInput;
        }
        if id.starts_with("Pos_UI") {
            if name.contains("real-time") || name.contains("real time") {
                return Self::RealTimeUpdate;
            }
            return Self::Functional(Polarity::Positive);
        }
        if id.starts_with("Pos_Fun") {
            return Self::Functional(Polarity::Positive);
        }
        if id.starts_with("Neg_Fun") {
            return Self::Functional(Polarity::Negative);
        }
        Self::Unrecognised
    }
}

/// A single row of the fixture workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    pub length: LengthClass,
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub category: String,
}

impl TestCase {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        input: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        let input = input.into();
        Self {
            id: id.into(),
            name: name.into(),
            length: LengthClass::for_input(&input),
            input,
            expected_output: expected_output.into(),
            justification: String::new(),
            category: String::new(),
        }
    }

    pub fn with_length(mut self, length: LengthClass) -> Self {
        self.length = length;
        self
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn kind(&self) -> CaseKind {
        CaseKind::classify(&self.id, &self.name)
    }
}

/// Reject empty or repeated ids
pub fn validate_ids(cases: &[TestCase]) -> Result<()> {
    let mut seen = HashSet::new();
    for case in cases {
        if case.id.trim().is_empty() {
            return Err(Error::EmptyId);
        }
        if !seen.insert(case.id.as_str()) {
            return Err(Error::DuplicateId(case.id.clone()));
        }
    }
    Ok(())
}

/// Outcome of a single executed case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Pass,
    Fail,
    Error,
}

impl Status {
    pub fn from_comparison(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "error" => Ok(Self::Error),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Result of running a single case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub case: TestCase,
    pub actual_output: String,
    pub status: Status,
    pub execution_time_ms: u64,
    pub error_message: Option<String>,
    pub screenshot_path: Option<String>,
}

/// Aggregate counters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            passed: 0,
            failed: 0,
            errors: 0,
            start_time: Utc::now(),
            end_time: None,
        }
    }

    pub fn count(&mut self, status: Status) {
        match status {
            Status::Pass => self.passed += 1,
            Status::Fail => self.failed += 1,
            Status::Error => self.errors += 1,
        }
    }

    /// Number of cases that have reported an outcome
    pub fn completed(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// Percentage of passed cases; `0.0` for an empty run
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }

    /// Wall-clock duration; measured up to now while the run is still open
    pub fn duration(&self) -> Duration {
        let end = self.end_time.unwrap_or_else(Utc::now);
        (end - self.start_time).to_std().unwrap_or_default()
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Pos_Fun_0001", "Entrance of attendance", CaseKind::Functional(Polarity::Positive); "positive functional")]
    #[test_case("Neg_Fun_0001", "Joined words no spaces", CaseKind::Functional(Polarity::Negative); "negative functional")]
    #[test_case("Pos_UI_0001", "Real-time output update", CaseKind::RealTimeUpdate; "real time ui")]
    #[test_case("Pos_UI_0002", "Output panel layout", CaseKind::Functional(Polarity::Positive); "other positive ui")]
    #[test_case("UI_TC_02", "Clear button empties input", CaseKind::ClearInput; "clear ui")]
    #[test_case("TC_0007", "Anything", CaseKind::Unrecognised; "unknown prefix")]
    fn test_classify(id: &str, name: &str, expected: CaseKind) {
        assert_eq!(CaseKind::classify(id, name), expected);
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(LengthClass::parse("x", "S").unwrap(), LengthClass::S);
        assert_eq!(LengthClass::parse("x", " m ").unwrap(), LengthClass::M);
        assert_eq!(LengthClass::parse("x", "L (≥ 300 characters)").unwrap(), LengthClass::L);
        assert!(LengthClass::parse("x", "").is_err());
        assert!(LengthClass::parse("x", "XL").is_err());
    }

    #[test]
    fn test_length_for_input() {
        assert_eq!(LengthClass::for_input("api yamu."), LengthClass::S);
        assert_eq!(LengthClass::for_input(&"a".repeat(31)), LengthClass::M);
        assert_eq!(LengthClass::for_input(&"a".repeat(300)), LengthClass::L);
    }

    #[test]
    fn test_validate_ids() {
        let a = TestCase::new("Pos_Fun_0001", "a", "x", "y");
        let b = TestCase::new("Pos_Fun_0002", "b", "x", "y");
        assert!(validate_ids(&[a.clone(), b]).is_ok());
        assert_eq!(
            validate_ids(&[a.clone(), a.clone()]),
            Err(Error::DuplicateId("Pos_Fun_0001".to_string()))
        );
        let blank = TestCase::new("  ", "c", "x", "y");
        assert_eq!(validate_ids(&[blank]), Err(Error::EmptyId));
    }

    #[test]
    fn test_status_round_trip_from_text() {
        assert_eq!("PASS".parse::<Status>().unwrap(), Status::Pass);
        assert_eq!(" fail ".parse::<Status>().unwrap(), Status::Fail);
        assert!("skipped".parse::<Status>().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new(4);
        summary.count(Status::Pass);
        summary.count(Status::Pass);
        summary.count(Status::Fail);
        summary.count(Status::Error);
        assert_eq!(summary.completed(), summary.total);
        assert_eq!(summary.pass_rate(), 50.0);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_empty_summary_pass_rate() {
        assert_eq!(RunSummary::new(0).pass_rate(), 0.0);
    }
}
