use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use finlytics_core::{
    Category, CategoryFilter, FilterCriteria, ParsedResult, SelectedFile, Session, Transaction,
};
use finlytics_export::{ExportError, ExportFormat, SHEET_NAME, export_session};
use std::path::Path;

fn export_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn parsed_session() -> Session {
    let raw = vec![
        Transaction::new()
            .with_date("2024-01-05")
            .with_description("Card purchase")
            .with_withdrawal(100.0)
            .with_balance(400.0)
            .with_category(Category::MoneyOut),
        Transaction::new()
            .with_date("2024-02-01")
            .with_description("Payroll")
            .with_deposit(500.0)
            .with_balance(900.0)
            .with_category(Category::MoneyIn),
        Transaction::new()
            .with_date("2024-02-03")
            .with_description("Service fee")
            .with_withdrawal(5.0)
            .with_category(Category::Other),
    ];
    let mut session = Session::new();
    session.select_files(vec![SelectedFile::new("statement.pdf", vec![0x25, 0x50])]);
    let req = session.begin_upload().unwrap();
    session.complete_upload(req.ticket, Ok(ParsedResult::from_raw(raw)));
    session
}

fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut wb: Xlsx<_> = open_workbook(path).unwrap();
    assert_eq!(wb.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = wb.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn is_blank(cell: &Data) -> bool {
    matches!(cell, Data::Empty) || *cell == Data::String(String::new())
}

#[test]
fn test_filtered_export_writes_matching_rows_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = parsed_session();
    session.set_criteria(
        FilterCriteria::default().with_category(CategoryFilter::Only(Category::MoneyIn)),
    );

    let report = export_session(&session, dir.path(), export_day(), ExportFormat::Xlsx).unwrap();
    assert!(report.filtered);
    assert_eq!(report.rows, 1);
    assert_eq!(
        report.path.file_name().unwrap(),
        "finlytics_transactions_filtered_2026-10-17.xlsx"
    );
    assert_eq!(report.notice(), "Excel file downloaded!");

    let rows = read_sheet(&report.path);
    assert_eq!(rows.len(), 2);
    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(
        header,
        vec!["Date", "Description", "Withdrawal", "Deposit", "Balance", "Category"]
    );
    assert_eq!(rows[1][0], Data::String("2024-02-01".into()));
    assert_eq!(rows[1][1], Data::String("Payroll".into()));
    assert!(is_blank(&rows[1][2]), "withdrawal should be blank, got {:?}", rows[1][2]);
    assert_eq!(rows[1][3], Data::Float(500.0));
    assert_eq!(rows[1][4], Data::Float(900.0));
    assert_eq!(rows[1][5], Data::String("Money In".into()));
}

#[test]
fn test_empty_filter_result_exports_raw() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = parsed_session();
    session.set_criteria(FilterCriteria::default().with_min("1000000"));
    assert!(session.filtered().is_empty());

    let report = export_session(&session, dir.path(), export_day(), ExportFormat::Xlsx).unwrap();
    assert!(!report.filtered);
    assert_eq!(report.rows, 3);
    assert_eq!(
        report.path.file_name().unwrap(),
        "finlytics_transactions_2026-10-17.xlsx"
    );

    let rows = read_sheet(&report.path);
    assert_eq!(rows.len(), 4);
    // fee row has no balance and no deposit
    assert!(is_blank(&rows[3][3]));
    assert!(is_blank(&rows[3][4]));
    assert_eq!(rows[3][2], Data::Float(5.0));
}

#[test]
fn test_default_criteria_exports_through_filtered_path() {
    let dir = tempfile::tempdir().unwrap();
    let session = parsed_session();
    let report = export_session(&session, dir.path(), export_day(), ExportFormat::Xlsx).unwrap();
    assert!(report.filtered);
    assert_eq!(report.rows, 3);
}

#[test]
fn test_export_without_data_produces_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new();
    let err = export_session(&session, dir.path(), export_day(), ExportFormat::Xlsx).unwrap_err();
    assert!(matches!(err, ExportError::NoData));
    assert_eq!(err.notice(), "No data to download");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = parsed_session();
    session.set_criteria(FilterCriteria::default().with_max("0"));

    let report = export_session(&session, dir.path(), export_day(), ExportFormat::Csv).unwrap();
    assert_eq!(
        report.path.file_name().unwrap(),
        "finlytics_transactions_filtered_2026-10-17.csv"
    );
    let text = std::fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Date,Description,Withdrawal,Deposit,Balance,Category",
            "2024-01-05,Card purchase,100,,400,Money Out",
            "2024-02-03,Service fee,5,,,Other",
        ]
    );
}
