//! finlytics-export: turn the visible transaction set into a downloadable
//! spreadsheet (xlsx or csv) with a deterministic file name

pub mod delimited;
pub mod filename;
pub mod rows;
pub mod xlsx;

use chrono::NaiveDate;
use finlytics_core::Session;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub use delimited::write_csv;
pub use filename::{export_date, export_filename};
pub use rows::{Cell, ExportRow, ExportSelection, HEADERS, project_row, select_source};
pub use xlsx::{SHEET_NAME, build_workbook, write_xlsx};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to download")]
    NoData,
    #[error("building workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("writing csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn notice(&self) -> &'static str {
        match self {
            ExportError::NoData => "No data to download",
            _ => "Export failed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {other} (expected xlsx or csv)")),
        }
    }
}

/// Where an export went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
    pub filtered: bool,
    pub format: ExportFormat,
}

impl ExportReport {
    pub fn notice(&self) -> &'static str {
        match self.format {
            ExportFormat::Xlsx => "Excel file downloaded!",
            ExportFormat::Csv => "CSV file downloaded!",
        }
    }
}

/// Serialize rows in `format`.
pub fn render(rows: &[ExportRow], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    Ok(match format {
        ExportFormat::Xlsx => write_xlsx(rows)?,
        ExportFormat::Csv => write_csv(rows)?,
    })
}

/// Export the session's current view into `dir`.
///
/// Uses the filtered transactions when any match, otherwise the full raw
/// list; fails with [`ExportError::NoData`] when nothing was parsed.
pub fn export_session(
    session: &Session,
    dir: &Path,
    date: NaiveDate,
    format: ExportFormat,
) -> Result<ExportReport, ExportError> {
    let selection = select_source(session.raw(), session.filtered())?;
    let rows: Vec<ExportRow> = selection
        .transactions
        .iter()
        .map(|t| project_row(t))
        .collect();
    let bytes = render(&rows, format)?;

    let path = dir.join(export_filename(selection.filtered, date, format));
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!("exported {} rows to {}", rows.len(), path.display());

    Ok(ExportReport {
        path,
        rows: rows.len(),
        filtered: selection.filtered,
        format,
    })
}
