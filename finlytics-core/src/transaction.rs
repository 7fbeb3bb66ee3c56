//! Normalized transaction records as returned by the statement parser

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction bucket assigned by the parsing service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Money In")]
    MoneyIn,
    #[serde(rename = "Money Out")]
    MoneyOut,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::MoneyIn, Category::MoneyOut, Category::Other];

    /// Label used on the wire and in exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::MoneyIn => "Money In",
            Category::MoneyOut => "Money Out",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// One parsed statement line. Every field is optional because the service
/// fills different columns depending on the input format (CSV rows carry a
/// signed `amount`, PDF rows carry `withdrawal`/`deposit`/`balance`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: Option<String>,
    pub description: Option<String>,
    /// Signed; positive = money in
    pub amount: Option<f64>,
    pub deposit: Option<f64>,
    pub withdrawal: Option<f64>,
    /// Running balance, informational only
    pub balance: Option<f64>,
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_deposit(mut self, deposit: f64) -> Self {
        self.deposit = Some(deposit);
        self
    }

    pub fn with_withdrawal(mut self, withdrawal: f64) -> Self {
        self.withdrawal = Some(withdrawal);
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// See [`crate::amount::resolve_amount`].
    pub fn resolved_amount(&self) -> Option<f64> {
        crate::amount::resolve_amount(self)
    }
}

/// Full response of one successful upload. Serializes in the service's
/// camelCase shape so a saved result can be decoded again.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub count: usize,
    pub money_in: Vec<Transaction>,
    pub money_out: Vec<Transaction>,
    pub other: Vec<Transaction>,
    /// Authoritative list in service order; filtering always starts here
    pub raw: Vec<Transaction>,
    pub ocr_enabled: Option<bool>,
}

impl ParsedResult {
    /// Build a result from a raw list, bucketing by category the same way
    /// the service does.
    pub fn from_raw(raw: Vec<Transaction>) -> Self {
        let bucket = |c: Category| -> Vec<Transaction> {
            raw.iter()
                .filter(|t| t.category == Some(c))
                .cloned()
                .collect()
        };
        Self {
            count: raw.len(),
            money_in: bucket(Category::MoneyIn),
            money_out: bucket(Category::MoneyOut),
            other: bucket(Category::Other),
            raw,
            ocr_enabled: None,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Parsed {} transactions (in: {}, out: {}, other: {})",
            self.count,
            self.money_in.len(),
            self.money_out.len(),
            self.other.len()
        )
    }
}
