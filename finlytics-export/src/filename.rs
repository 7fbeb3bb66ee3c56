use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::ExportFormat;

/// `finlytics_transactions[_filtered]_<YYYY-MM-DD>.<ext>`
pub fn export_filename(filtered: bool, date: NaiveDate, format: ExportFormat) -> String {
    let stem = if filtered {
        "finlytics_transactions_filtered_"
    } else {
        "finlytics_transactions_"
    };
    format!("{stem}{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Calendar date of the export moment, in `tz` or UTC.
pub fn export_date(now: DateTime<Utc>, tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filenames() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            export_filename(false, d, ExportFormat::Xlsx),
            "finlytics_transactions_2026-03-07.xlsx"
        );
        assert_eq!(
            export_filename(true, d, ExportFormat::Xlsx),
            "finlytics_transactions_filtered_2026-03-07.xlsx"
        );
        assert_eq!(
            export_filename(true, d, ExportFormat::Csv),
            "finlytics_transactions_filtered_2026-03-07.csv"
        );
    }

    #[test]
    fn test_export_date_follows_zone() {
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 23, 30, 0).unwrap();
        assert_eq!(export_date(now, None), NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
        let joburg: Tz = "Africa/Johannesburg".parse().unwrap();
        assert_eq!(
            export_date(now, Some(joburg)),
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
        );
    }
}
