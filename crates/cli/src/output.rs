//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;

use singlish_common::{RunSummary, Status, TestResult};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// One line per case
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Width of the output column in the results table
const OUTPUT_PREVIEW: usize = 40;

/// Per-case row of the results table
#[derive(Debug, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub actual_output: String,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TestResult> for ResultRow {
    fn from(result: &TestResult) -> Self {
        Self {
            id: result.case.id.clone(),
            name: result.case.name.clone(),
            status: result.status,
            actual_output: result.actual_output.clone(),
            execution_time_ms: result.execution_time_ms,
            error: result.error_message.clone(),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > OUTPUT_PREVIEW {
        let head: String = text.chars().take(OUTPUT_PREVIEW).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}

impl TableDisplay for ResultRow {
    fn headers() -> Vec<&'static str> {
        vec!["TC ID", "Name", "Status", "Actual output", "Time"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.status.to_string(),
            match &self.error {
                Some(err) => preview(err),
                None => preview(&self.actual_output),
            },
            format!("{}ms", self.execution_time_ms),
        ]
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Pass => Color::Green,
        Status::Fail => Color::Red,
        Status::Error => Color::Yellow,
    }
}

/// Print per-case results
pub fn print_results(results: &[TestResult], format: OutputFormat) {
    if results.is_empty() {
        println!("No results.");
        return;
    }
    let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(ResultRow::headers());
            for row in &rows {
                let cells: Vec<Cell> = row
                    .row()
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| {
                        if i == 2 {
                            Cell::new(text).fg(status_color(row.status))
                        } else {
                            Cell::new(text)
                        }
                    })
                    .collect();
                table.add_row(cells);
            }

            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        }
        OutputFormat::Plain => {
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "{:02}. [{}] {:<6} | {}",
                    i + 1,
                    row.id,
                    row.status.as_str(),
                    row.name
                );
            }
        }
    }
}

/// End-of-run summary block
pub fn print_run_summary(summary: &RunSummary, written: &[PathBuf]) {
    let rule = "=".repeat(60);
    println!();
    println!("{}", rule.cyan());
    println!("{}", "TEST EXECUTION COMPLETE".cyan().bold());
    println!("{}", rule.cyan());

    println!("{}", "\nSUMMARY:".blue().bold());
    println!("{}", format!("  Passed: {}", summary.passed).green());
    println!("{}", format!("  Failed: {}", summary.failed).red());
    println!("{}", format!("  Errors: {}", summary.errors).yellow());
    println!("{}", format!("  Total: {}", summary.total).blue());
    println!("{}", format!("  Pass Rate: {:.2}%", summary.pass_rate()).magenta());
    println!(
        "{}",
        format!("  Duration: {:.2} seconds", summary.duration().as_secs_f64()).cyan()
    );

    if !written.is_empty() {
        println!("{}", "\nOUTPUT FILES:".blue().bold());
        for path in written {
            println!("  {}", path.display());
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("⚠️  {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use singlish_common::TestCase;
    use test_case::test_case;

    fn result(status: Status, actual: &str, error: Option<&str>) -> TestResult {
        TestResult {
            case: TestCase::new("Pos_Fun_0001", "Greeting", "mama", "මම"),
            actual_output: actual.to_string(),
            status,
            execution_time_ms: 42,
            error_message: error.map(str::to_string),
            screenshot_path: None,
        }
    }

    #[test]
    fn test_row_shows_output() {
        let row = ResultRow::from(&result(Status::Pass, "මම", None));
        assert_eq!(row.row(), vec!["Pos_Fun_0001", "Greeting", "Pass", "මම", "42ms"]);
    }

    #[test]
    fn test_row_prefers_error() {
        let row = ResultRow::from(&result(Status::Error, "", Some("timed out after 60000 ms")));
        assert_eq!(row.row()[3], "timed out after 60000 ms");
    }

    #[test_case(3, 3, false; "short output unchanged")]
    #[test_case(OUTPUT_PREVIEW, OUTPUT_PREVIEW, false; "output at the limit unchanged")]
    #[test_case(OUTPUT_PREVIEW + 5, OUTPUT_PREVIEW + 1, true; "long output truncated")]
    fn test_preview(len: usize, shown_len: usize, ellipsis: bool) {
        let shown = preview(&"ම".repeat(len));
        assert_eq!(shown.chars().count(), shown_len);
        assert_eq!(shown.ends_with('…'), ellipsis);
    }

    #[test]
    fn test_json_row_omits_missing_error() {
        let row = ResultRow::from(&result(Status::Fail, "x", None));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["status"], "Fail");
        assert!(json.get("error").is_none());
    }
}
