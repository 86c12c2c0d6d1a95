//! Report emission: results workbook, HTML page, text summary and JSON

use chrono::{DateTime, Local, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use singlish_common::{RunReport, RunSummary, TestResult};

use crate::config::HarnessConfig;
use crate::error::E2eResult;
use crate::fixture::{self, Cell, Outcome, Sheet};

pub const SUMMARY_SHEET: &str = "Summary";

/// Characters of input/output shown per HTML row
const SAMPLE_CHARS: usize = 20;

/// Values interpolated into the reports besides the results themselves
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub target_url: String,
    pub browser: String,
    pub workbook_path: PathBuf,
    pub html_path: PathBuf,
    pub text_path: PathBuf,
    pub json_path: PathBuf,
    pub screenshot_dir: PathBuf,
}

impl ReportContext {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            target_url: config.target.url.clone(),
            browser: config.webdriver.browser.as_str().to_string(),
            workbook_path: config.results_workbook(),
            html_path: config.html_report(),
            text_path: config.text_summary(),
            json_path: config.json_results(),
            screenshot_dir: config.paths.screenshot_dir.clone(),
        }
    }
}

/// Rendered reports, not yet written anywhere
#[derive(Debug, Clone)]
pub struct EmittedReports {
    pub workbook: Vec<u8>,
    pub html: String,
    pub text: String,
    pub json: String,
}

/// Render every report for a finished run
pub fn emit(report: &RunReport, fixture: &[Sheet], ctx: &ReportContext) -> E2eResult<EmittedReports> {
    let sheets = results_sheets(report, fixture)?;
    let workbook = fixture::build_workbook(&sheets)?.save_to_buffer()?;

    Ok(EmittedReports {
        workbook,
        html: render_html(report),
        text: render_text(report, ctx),
        json: serde_json::to_string_pretty(report)?,
    })
}

/// Write rendered reports to their fixed file names
pub fn write_reports(reports: &EmittedReports, ctx: &ReportContext) -> E2eResult<Vec<PathBuf>> {
    let outputs = [
        (&ctx.workbook_path, reports.workbook.as_slice()),
        (&ctx.html_path, reports.html.as_bytes()),
        (&ctx.text_path, reports.text.as_bytes()),
        (&ctx.json_path, reports.json.as_bytes()),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, bytes)?;
        info!("Report written to {}", path.display());
        written.push(path.clone());
    }
    Ok(written)
}

/// Fixture sheets with results filled in and a fresh `Summary` sheet appended
pub fn results_sheets(report: &RunReport, fixture: &[Sheet]) -> E2eResult<Vec<Sheet>> {
    let mut sheets: Vec<Sheet> = fixture
        .iter()
        .filter(|s| s.name != SUMMARY_SHEET)
        .cloned()
        .collect();

    if fixture::cases_sheet(&sheets).is_err() {
        let cases: Vec<_> = report.results.iter().map(|r| r.case.clone()).collect();
        let mut generated = fixture::fixture_sheets(&cases);
        generated.truncate(1);
        sheets.splice(0..0, generated);
    }

    let outcomes: HashMap<String, Outcome> = report
        .results
        .iter()
        .map(|r| {
            (
                r.case.id.clone(),
                Outcome {
                    actual: r.actual_output.clone(),
                    status: r.status.to_string(),
                },
            )
        })
        .collect();
    fixture::apply_outcomes(&mut sheets, &outcomes)?;

    sheets.push(summary_sheet(&report.summary));
    Ok(sheets)
}

fn summary_sheet(summary: &RunSummary) -> Sheet {
    let end = summary.end_time.unwrap_or_else(Utc::now);
    let mut sheet = Sheet::new(SUMMARY_SHEET);
    sheet.push_row([Cell::text("Test Execution Summary")]);
    sheet.push_row([Cell::Empty]);
    sheet.push_row([Cell::text("Total Tests:"), Cell::from(summary.total)]);
    sheet.push_row([Cell::text("Passed:"), Cell::from(summary.passed)]);
    sheet.push_row([Cell::text("Failed:"), Cell::from(summary.failed)]);
    sheet.push_row([Cell::text("Errors:"), Cell::from(summary.errors)]);
    sheet.push_row([Cell::text("Pass Rate:"), Cell::text(format!("{:.2}%", summary.pass_rate()))]);
    sheet.push_row([Cell::text("Start Time:"), Cell::text(summary.start_time.to_rfc3339())]);
    sheet.push_row([Cell::text("End Time:"), Cell::text(end.to_rfc3339())]);
    sheet.push_row([
        Cell::text("Total Duration:"),
        Cell::text(format!("{:.3} seconds", summary.duration().as_secs_f64())),
    ]);
    sheet
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First [`SAMPLE_CHARS`] characters, with `...` when cut
pub fn sample(text: &str) -> String {
    if text.chars().count() > SAMPLE_CHARS {
        let head: String = text.chars().take(SAMPLE_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn finished_local(summary: &RunSummary) -> DateTime<Local> {
    summary
        .end_time
        .unwrap_or(summary.start_time)
        .with_timezone(&Local)
}

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; background-color: #f4f7f9; color: #333; margin: 0; padding: 20px; }
.container { max-width: 1100px; margin: 0 auto; background: #fff; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1 { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
.summary { display: flex; justify-content: space-between; background: #ecf0f1; padding: 15px; border-radius: 5px; margin: 20px 0; }
.summary-item { text-align: center; flex: 1; }
.summary-item strong { display: block; font-size: 1.2em; color: #2980b9; }
table { width: 100%; border-collapse: collapse; margin-top: 25px; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #34495e; color: white; font-weight: normal; }
.status-pass { color: #27ae60; font-weight: bold; }
.status-fail { color: #e74c3c; font-weight: bold; }
code { background: #f8f8f8; padding: 2px 4px; border-radius: 3px; font-family: monospace; font-size: 0.9em; }
.screenshot-link { color: #3498db; text-decoration: none; }
.screenshot-link:hover { text-decoration: underline; }
.meta-info { font-size: 0.85em; color: #7f8c8d; margin-top: 5px; }
"#;

fn html_row(result: &TestResult) -> String {
    let class = if result.status == singlish_common::Status::Pass {
        "status-pass"
    } else {
        "status-fail"
    };
    let artifact = match &result.screenshot_path {
        Some(path) => format!(
            r#"<a href="../{}" target="_blank" class="screenshot-link">Screenshot</a>"#,
            escape_html(path)
        ),
        None => "-".to_string(),
    };
    format!(
        r#"
<tr>
<td>{}</td>
<td>{}</td>
<td><code>{}</code></td>
<td><code>{}</code></td>
<td class="{}">{}</td>
<td>{}</td>
</tr>"#,
        escape_html(&result.case.id),
        escape_html(&result.case.name),
        escape_html(&sample(&result.case.input)),
        escape_html(&sample(&result.actual_output)),
        class,
        result.status,
        artifact,
    )
}

/// Self-contained HTML page, no external assets
pub fn render_html(report: &RunReport) -> String {
    let summary = &report.summary;
    let rows: String = report.results.iter().map(html_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Test Execution Report</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<h1>Translation Test Results</h1>
<div class="meta-info">Execution Time: {when} | Total Duration: {duration:.2}s</div>
<div class="summary">
<div class="summary-item"><strong>{total}</strong>Total Tests</div>
<div class="summary-item"><strong style="color: #27ae60;">{passed}</strong>Passed</div>
<div class="summary-item"><strong style="color: #e74c3c;">{failed}</strong>Failed</div>
<div class="summary-item"><strong>{rate:.2}%</strong>Pass Rate</div>
</div>
<table>
<thead>
<tr><th>TC ID</th><th>Test Name</th><th>Input Sample</th><th>Output Sample</th><th>Status</th><th>Artifacts</th></tr>
</thead>
<tbody>{rows}
</tbody>
</table>
</div>
</body>
</html>
"#,
        style = STYLE,
        when = finished_local(summary).format("%Y-%m-%d %H:%M:%S"),
        duration = summary.duration().as_secs_f64(),
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed + summary.errors,
        rate = summary.pass_rate(),
        rows = rows,
    )
}

/// Fixed-width plain-text summary
pub fn render_text(report: &RunReport, ctx: &ReportContext) -> String {
    let summary = &report.summary;
    let rule = "=".repeat(45);
    let thin = "-".repeat(45);
    let section = |title: &str| vec![thin.clone(), title.to_string(), thin.clone()];

    let mut lines = vec![
        rule.clone(),
        "        TRANSLATION SYSTEM TEST SUMMARY".to_string(),
        rule.clone(),
        format!(
            "Execution Date: {}",
            finished_local(summary).format("%Y-%m-%d %H:%M:%S")
        ),
        format!("Target System:  {}", ctx.target_url),
        format!(
            "Environment:    singlish-e2e {} / WebDriver {}",
            singlish_common::VERSION,
            ctx.browser
        ),
        String::new(),
    ];

    lines.extend(section("TEST STATISTICS"));
    lines.extend([
        format!("Total Tests:      {}", summary.total),
        format!("Passed:           {}", summary.passed),
        format!("Failed/Errors:    {}", summary.failed + summary.errors),
        format!("Pass Rate:        {:.2}%", summary.pass_rate()),
        format!("Duration:         {:.2} seconds", summary.duration().as_secs_f64()),
        String::new(),
    ]);

    lines.extend(section("OUTPUT ARTIFACTS"));
    lines.extend([
        format!("1. Excel Workbook: {}", ctx.workbook_path.display()),
        format!("2. HTML Report:    {}", ctx.html_path.display()),
        format!("3. JSON Results:   {}", ctx.json_path.display()),
        format!("4. Screenshots:    {}/", ctx.screenshot_dir.display()),
        String::new(),
    ]);

    lines.extend(section("DETAILED RESULTS BY CASE"));
    lines.extend(
        report
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| case_line(i + 1, result)),
    );
    lines.extend([
        String::new(),
        rule.clone(),
        "             END OF EXECUTION".to_string(),
        rule,
        String::new(),
    ]);

    lines.join("\n")
}

/// `NN. [id] STATUS | name`
pub fn case_line(number: usize, result: &TestResult) -> String {
    format!(
        "{:02}. [{}] {:<6} | {}",
        number,
        result.case.id,
        result.status.as_str(),
        result.case.name
    )
}
