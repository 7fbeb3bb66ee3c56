//! CSV output using the same projection as the workbook

use crate::rows::{ExportRow, HEADERS};

pub fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.write_record(row.cells.iter().map(|c| c.to_field()))?;
    }
    wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::project_row;
    use finlytics_core::{Category, Transaction};

    #[test]
    fn test_csv_layout() {
        let rows = vec![
            project_row(
                &Transaction::new()
                    .with_date("2024-01-05")
                    .with_description("Coffee, large")
                    .with_withdrawal(3.5)
                    .with_category(Category::MoneyOut),
            ),
            project_row(&Transaction::new().with_deposit(500.0)),
        ];
        let out = String::from_utf8(write_csv(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Date,Description,Withdrawal,Deposit,Balance,Category");
        assert_eq!(lines[1], "2024-01-05,\"Coffee, large\",3.5,,,Money Out");
        assert_eq!(lines[2], ",,,500,,");
        assert_eq!(lines.len(), 3);
    }
}
