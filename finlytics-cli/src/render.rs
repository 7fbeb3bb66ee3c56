use finlytics_core::{Transaction, parse_calendar_date};

const DESC_WIDTH: usize = 40;

fn date_cell(t: &Transaction) -> String {
    match t.date.as_deref() {
        None => "—".to_string(),
        Some(raw) => parse_calendar_date(raw)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

fn money_cell(v: Option<f64>) -> String {
    v.map(|n| format!("{n:.2}")).unwrap_or_default()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Plain-text table of the visible transactions.
pub fn transactions_table(txns: &[&Transaction]) -> String {
    if txns.is_empty() {
        return "No transactions match your filters.\n".to_string();
    }

    let mut s = format!(
        "{:<12} {:<w$} {:>12} {:>12} {}\n",
        "Date",
        "Description",
        "Withdrawal",
        "Deposit",
        "Category",
        w = DESC_WIDTH
    );
    for t in txns {
        let desc = truncate(t.description.as_deref().unwrap_or("—"), DESC_WIDTH);
        s.push_str(&format!(
            "{:<12} {:<w$} {:>12} {:>12} {}\n",
            date_cell(t),
            desc,
            money_cell(t.withdrawal),
            money_cell(t.deposit),
            t.category.map(|c| c.label()).unwrap_or(""),
            w = DESC_WIDTH
        ));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use finlytics_core::Category;

    #[test]
    fn test_empty_view() {
        assert_eq!(transactions_table(&[]), "No transactions match your filters.\n");
    }

    #[test]
    fn test_rows_and_placeholders() {
        let a = Transaction::new()
            .with_date("01/05/2024")
            .with_description("Card purchase")
            .with_withdrawal(100.0)
            .with_category(Category::MoneyOut);
        let b = Transaction::new().with_date("Feb 01").with_deposit(500.5);
        let c = Transaction::new();
        let out = transactions_table(&[&a, &b, &c]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("2024-01-05"));
        assert!(lines[1].contains("100.00"));
        assert!(lines[1].ends_with("Money Out"));
        assert!(lines[2].starts_with("Feb 01"));
        assert!(lines[2].contains("500.50"));
        assert!(lines[3].starts_with("—"));
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        let long = "x".repeat(60);
        let t = truncate(&long, DESC_WIDTH);
        assert_eq!(t.chars().count(), DESC_WIDTH);
        assert!(t.ends_with('…'));
    }
}
