//! Excel workbook output

use log::warn;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::rows::{COLUMN_WIDTHS, Cell, ExportRow, HEADERS};

pub const SHEET_NAME: &str = "Transactions";

/// Excel's per-cell text limit, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

fn fit_cell(text: &str, row: u32, col: u16) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                "row {row} column {}: text truncated to {MAX_CELL_CHARS} characters",
                HEADERS[col as usize]
            );
            &text[..cut]
        }
        None => text,
    }
}

/// Build a single-sheet workbook: header row, then one row per transaction.
pub fn build_workbook(rows: &[ExportRow]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string(0, col, *header)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => sheet.write_string(r, col, fit_cell(s, r, col))?,
                Cell::Number(n) => sheet.write_number(r, col, *n)?,
                Cell::Empty => sheet.write_string(r, col, "")?,
            };
        }
    }

    Ok(workbook)
}

pub fn write_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, XlsxError> {
    build_workbook(rows)?.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::project_row;
    use calamine::{Data, Reader, Xlsx};
    use finlytics_core::Transaction;
    use std::io::Cursor;

    #[test]
    fn test_oversized_text_is_truncated_not_rejected() {
        let long = "é".repeat(MAX_CELL_CHARS + 500);
        let rows = vec![project_row(
            &Transaction::new().with_description(long).with_deposit(1.0),
        )];
        let bytes = write_xlsx(&rows).unwrap();

        let mut wb = Xlsx::new(Cursor::new(bytes)).unwrap();
        let range = wb.worksheet_range(SHEET_NAME).unwrap();
        match range.get_value((1, 1)) {
            Some(Data::String(s)) => assert_eq!(s.chars().count(), MAX_CELL_CHARS),
            other => panic!("unexpected description cell: {other:?}"),
        }
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(1.0)));
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(fit_cell("Payroll", 1, 1), "Payroll");
    }
}
