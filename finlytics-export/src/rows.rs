//! Source selection and row projection for spreadsheet export.

use finlytics_core::Transaction;

use crate::ExportError;

/// Fixed column order of every export
pub const HEADERS: [&str; 6] = ["Date", "Description", "Withdrawal", "Deposit", "Balance", "Category"];

/// Width hints (characters) matching [`HEADERS`]
pub const COLUMN_WIDTHS: [f64; 6] = [12.0, 40.0, 12.0, 12.0, 12.0, 15.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Absent field; written as an empty string, never as `0`
    Empty,
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => Cell::Text(s.to_string()),
            _ => Cell::Empty,
        }
    }

    fn number(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }

    /// Plain-text rendering used by CSV output
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub cells: [Cell; 6],
}

pub fn project_row(txn: &Transaction) -> ExportRow {
    ExportRow {
        cells: [
            Cell::text(txn.date.as_deref()),
            Cell::text(txn.description.as_deref()),
            Cell::number(txn.withdrawal),
            Cell::number(txn.deposit),
            Cell::number(txn.balance),
            Cell::text(txn.category.map(|c| c.label())),
        ],
    }
}

/// Transactions chosen for export and whether they came from the filtered view
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSelection<'a> {
    pub transactions: Vec<&'a Transaction>,
    pub filtered: bool,
}

/// Prefer the filtered view; fall back to `raw` when the filter matched
/// nothing. An empty `raw` is an error, not an empty file.
pub fn select_source<'a>(
    raw: &'a [Transaction],
    filtered: Vec<&'a Transaction>,
) -> Result<ExportSelection<'a>, ExportError> {
    if raw.is_empty() {
        return Err(ExportError::NoData);
    }
    if !filtered.is_empty() {
        return Ok(ExportSelection {
            transactions: filtered,
            filtered: true,
        });
    }
    Ok(ExportSelection {
        transactions: raw.iter().collect(),
        filtered: false,
    })
}
