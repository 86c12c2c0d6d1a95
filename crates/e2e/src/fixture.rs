//! Fixture workbook access
//!
//! Cases live in the `"Test cases"` sheet of an `.xlsx` workbook. Sheets are
//! read into plain [`Sheet`] grids with calamine and written back with
//! rust_xlsxwriter, so a results workbook carries every sheet of the
//! fixture it came from.

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Utc;
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use singlish_common::catalog::Coverage;
use singlish_common::{validate_ids, LengthClass, TestCase};

use crate::error::{E2eError, E2eResult};

pub const CASES_SHEET: &str = "Test cases";
pub const INSTRUCTIONS_SHEET: &str = "How to fill columns A and C";
pub const COVERAGE_SHEET: &str = "Test Coverage Summary";

/// Standard header of the cases sheet
pub const HEADER: [&str; 9] = [
    "TC ID",
    "Test case name",
    "Input length type",
    "Input",
    "Expected output",
    "Actual output",
    "Status",
    "Accuracy justification/ Description of issue type",
    "What is covered by the test",
];

/// Column widths (characters) of the cases sheet
pub const COLUMN_WIDTHS: [f64; 9] = [12.0, 40.0, 15.0, 50.0, 50.0, 50.0, 10.0, 80.0, 40.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// One worksheet as a dense grid
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    /// Column widths to apply on write; empty keeps the writer defaults
    pub widths: Vec<f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            widths: Vec::new(),
        }
    }

    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(r) = self.rows.get_mut(row) {
            if r.len() <= col {
                r.resize(col + 1, Cell::Empty);
            }
            r[col] = cell;
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Number(n as f64)
    }
}

/// Positions of the known columns in a cases-sheet header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub id: usize,
    pub name: Option<usize>,
    pub length: Option<usize>,
    pub input: usize,
    pub expected: usize,
    pub actual: Option<usize>,
    pub status: Option<usize>,
    pub justification: Option<usize>,
    pub category: Option<usize>,
}

/// Lowercase with whitespace runs collapsed, so `"TC  ID "` matches `"TC ID"`
fn header_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Columns {
    pub fn locate(header: &[Cell]) -> E2eResult<Self> {
        let keys: Vec<String> = header.iter().map(|c| header_key(&c.to_string())).collect();
        let find = |pred: &dyn Fn(&str) -> bool| keys.iter().position(|k| pred(k));
        let require = |column: &str, found: Option<usize>| {
            found.ok_or_else(|| {
                E2eError::Fixture(format!("'{}' sheet has no '{}' column", CASES_SHEET, column))
            })
        };

        Ok(Self {
            id: require("TC ID", find(&|k| k == "tc id"))?,
            name: find(&|k| k == "test case name"),
            length: find(&|k| k.starts_with("input length")),
            input: require("Input", find(&|k| k == "input"))?,
            expected: require("Expected output", find(&|k| k == "expected output"))?,
            actual: find(&|k| k == "actual output"),
            status: find(&|k| k == "status"),
            justification: find(&|k| k.contains("justification")),
            category: find(&|k| k.contains("covered")),
        })
    }
}

/// Read every sheet of a workbook in tab order
pub fn read_sheets(path: &Path) -> E2eResult<Vec<Sheet>> {
    if !path.exists() {
        return Err(E2eError::Fixture(format!("file not found: {}", path.display())));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut sheet = Sheet::new(name);
        sheet.rows.resize(row_offset, Vec::new());
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; col_offset];
            cells.extend(row.iter().map(Cell::from));
            sheet.rows.push(cells);
        }
        debug!("Read sheet '{}' ({} rows)", sheet.name, sheet.rows.len());
        sheets.push(sheet);
    }
    Ok(sheets)
}

/// Parse the cases sheet; rows with a blank `TC ID` are skipped
pub fn parse_cases(sheet: &Sheet) -> E2eResult<Vec<TestCase>> {
    let header = sheet
        .rows
        .first()
        .ok_or_else(|| E2eError::Fixture(format!("'{}' sheet is empty", sheet.name)))?;
    let columns = Columns::locate(header)?;

    let text = |row: &[Cell], col: Option<usize>| {
        col.and_then(|c| row.get(c)).map(|c| c.to_string()).unwrap_or_default()
    };

    let mut cases = Vec::new();
    for row in sheet.rows.iter().skip(1) {
        let id = text(row, Some(columns.id)).trim().to_string();
        if id.is_empty() {
            continue;
        }
        let input = text(row, Some(columns.input));
        let length_cell = text(row, columns.length);
        let length = if length_cell.trim().is_empty() {
            LengthClass::for_input(&input)
        } else {
            LengthClass::parse(&id, &length_cell)?
        };

        cases.push(
            TestCase::new(id, text(row, columns.name), input, text(row, Some(columns.expected)))
                .with_length(length)
                .with_justification(text(row, columns.justification))
                .with_category(text(row, columns.category)),
        );
    }

    validate_ids(&cases).map_err(|e| E2eError::Fixture(e.to_string()))?;
    Ok(cases)
}

/// Load test cases from a fixture workbook
pub fn load_cases(path: &Path) -> E2eResult<Vec<TestCase>> {
    let sheets = read_sheets(path)?;
    let sheet = cases_sheet(&sheets)?;
    let cases = parse_cases(sheet)?;
    info!("Loaded {} test case(s) from {}", cases.len(), path.display());
    Ok(cases)
}

pub fn cases_sheet(sheets: &[Sheet]) -> E2eResult<&Sheet> {
    sheets
        .iter()
        .find(|s| s.name == CASES_SHEET)
        .ok_or_else(|| E2eError::Fixture(format!("sheet '{}' not found in workbook", CASES_SHEET)))
}

/// Observed output and status for one case id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub actual: String,
    pub status: String,
}

/// Write `Actual output`/`Status` into the cases sheet by `TC ID`.
///
/// Returns the number of rows updated. The sheet picks up the standard
/// column widths.
pub fn apply_outcomes(sheets: &mut [Sheet], outcomes: &HashMap<String, Outcome>) -> E2eResult<usize> {
    let sheet = sheets
        .iter_mut()
        .find(|s| s.name == CASES_SHEET)
        .ok_or_else(|| E2eError::Fixture(format!("sheet '{}' not found in workbook", CASES_SHEET)))?;
    let header = sheet
        .rows
        .first()
        .ok_or_else(|| E2eError::Fixture(format!("'{}' sheet is empty", CASES_SHEET)))?;
    let columns = Columns::locate(header)?;

    let mut updated = 0;
    for row in 1..sheet.rows.len() {
        let id = match sheet.cell(row, columns.id) {
            Some(cell) if !cell.is_empty() => cell.to_string().trim().to_string(),
            _ => continue,
        };
        if let Some(outcome) = outcomes.get(&id) {
            if let Some(col) = columns.actual {
                sheet.set(row, col, Cell::text(outcome.actual.clone()));
            }
            if let Some(col) = columns.status {
                sheet.set(row, col, Cell::text(outcome.status.clone()));
            }
            updated += 1;
        }
    }
    sheet.widths = COLUMN_WIDTHS.to_vec();
    Ok(updated)
}

/// Assemble a workbook from sheets in order
pub fn build_workbook(sheets: &[Sheet]) -> E2eResult<Workbook> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) if s.is_empty() => {}
                    Cell::Text(s) => {
                        worksheet.write_string(r as u32, c as u16, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r as u32, c as u16, *n)?;
                    }
                }
            }
        }
        for (c, width) in sheet.widths.iter().enumerate() {
            worksheet.set_column_width(c as u16, *width)?;
        }
    }
    Ok(workbook)
}

pub fn write_sheets(sheets: &[Sheet], path: &Path) -> E2eResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    build_workbook(sheets)?.save(path)?;
    Ok(())
}

/// Sheets of a freshly generated fixture
pub fn fixture_sheets(cases: &[TestCase]) -> Vec<Sheet> {
    let mut cases_sheet = Sheet::new(CASES_SHEET);
    cases_sheet.push_row(HEADER);
    for case in cases {
        cases_sheet.push_row([
            case.id.clone(),
            case.name.clone(),
            case.length.to_string(),
            case.input.clone(),
            case.expected_output.clone(),
            String::new(),
            String::new(),
            case.justification.clone(),
            case.category.clone(),
        ]);
    }
    cases_sheet.widths = COLUMN_WIDTHS.to_vec();

    let mut instructions = Sheet::new(INSTRUCTIONS_SHEET);
    for line in [
        "Test case ID conventions:",
        "1. Positive functional test cases should begin with 'Pos_Fun'",
        "2. Negative functional test cases should begin with 'Neg_Fun'",
        "3. UI test cases should begin with 'Pos_UI'",
    ] {
        instructions.push_row([line]);
    }

    let coverage = Coverage::of(cases);
    let mut summary = Sheet::new(COVERAGE_SHEET);
    summary.push_row([Cell::text("TEST COVERAGE SUMMARY")]);
    summary.push_row([Cell::text(format!("Generated: {}", Utc::now().to_rfc3339()))]);
    summary.push_row([Cell::Empty]);
    summary.push_row([Cell::text("Positive functional"), Cell::from(coverage.positive)]);
    summary.push_row([Cell::text("Negative functional"), Cell::from(coverage.negative)]);
    summary.push_row([Cell::text("UI"), Cell::from(coverage.ui)]);
    summary.push_row([Cell::text("Total"), Cell::from(cases.len())]);

    vec![cases_sheet, instructions, summary]
}

/// Write a fixture workbook for `cases`
pub fn generate_fixture(cases: &[TestCase], path: &Path) -> E2eResult<()> {
    validate_ids(cases)?;
    write_sheets(&fixture_sheets(cases), path)?;
    info!("Fixture with {} case(s) written to {}", cases.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_row() -> Vec<Cell> {
        HEADER.iter().map(|h| Cell::text(*h)).collect()
    }

    fn sheet_with(rows: Vec<Vec<&str>>) -> Sheet {
        let mut sheet = Sheet::new(CASES_SHEET);
        sheet.rows.push(header_row());
        for row in rows {
            sheet.push_row(row);
        }
        sheet
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(7.0).to_string(), "7");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::Empty.to_string(), "");
        assert!(Cell::text("  ").is_empty());
    }

    #[test]
    fn test_locate_tolerates_spacing_and_case() {
        let header = vec![
            Cell::text("tc  id"),
            Cell::text("Input "),
            Cell::text("EXPECTED OUTPUT"),
            Cell::text("Status"),
        ];
        let columns = Columns::locate(&header).unwrap();
        assert_eq!(columns.id, 0);
        assert_eq!(columns.input, 1);
        assert_eq!(columns.expected, 2);
        assert_eq!(columns.status, Some(3));
        assert_eq!(columns.actual, None);
    }

    #[test]
    fn test_locate_requires_id_column() {
        let header = vec![Cell::text("Input"), Cell::text("Expected output")];
        assert!(matches!(Columns::locate(&header), Err(E2eError::Fixture(_))));
    }

    #[test]
    fn test_parse_skips_blank_ids() {
        let sheet = sheet_with(vec![
            vec!["Pos_Fun_0001", "Greeting", "s", "mama", "මම"],
            vec!["", "ignored", "S", "x", "y"],
            vec!["Neg_Fun_0001", "Joined", "", "mamagedharayanawa", "මමගෙදරයනවා"],
        ]);
        let cases = parse_cases(&sheet).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].length, LengthClass::S);
        assert_eq!(cases[1].id, "Neg_Fun_0001");
        assert_eq!(cases[1].length, LengthClass::S);
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let sheet = sheet_with(vec![
            vec!["Pos_Fun_0001", "a", "S", "x", "y"],
            vec!["Pos_Fun_0001", "b", "S", "x", "y"],
        ]);
        assert!(matches!(parse_cases(&sheet), Err(E2eError::Fixture(_))));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        let sheet = sheet_with(vec![vec!["Pos_Fun_0001", "a", "Q", "x", "y"]]);
        assert!(matches!(parse_cases(&sheet), Err(E2eError::Case(_))));
    }

    #[test]
    fn test_apply_outcomes() {
        let mut sheets = vec![sheet_with(vec![
            vec!["Pos_Fun_0001", "a", "S", "x", "y"],
            vec!["Pos_Fun_0002", "b", "S", "x", "y"],
        ])];
        let outcomes: HashMap<String, Outcome> = [(
            "Pos_Fun_0002".to_string(),
            Outcome { actual: "out".into(), status: "Pass".into() },
        )]
        .into_iter()
        .collect();

        assert_eq!(apply_outcomes(&mut sheets, &outcomes).unwrap(), 1);
        assert_eq!(sheets[0].rows[2][5], Cell::text("out"));
        assert_eq!(sheets[0].rows[2][6], Cell::text("Pass"));
        assert!(sheets[0].rows[1].get(5).map_or(true, Cell::is_empty));
        assert_eq!(sheets[0].widths, COLUMN_WIDTHS.to_vec());
    }

    #[test]
    fn test_fixture_sheets_layout() {
        let cases = singlish_common::catalog::builtin_cases();
        let sheets = fixture_sheets(&cases);
        let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![CASES_SHEET, INSTRUCTIONS_SHEET, COVERAGE_SHEET]);
        assert_eq!(sheets[0].rows.len(), cases.len() + 1);
        assert_eq!(parse_cases(&sheets[0]).unwrap(), cases);
    }
}
