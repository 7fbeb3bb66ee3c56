//! Compound transaction filter: category, date range, amount range.
//!
//! Criteria are kept as the raw strings the user typed; [`FilterCriteria::compile`]
//! turns them into typed bounds once per evaluation. An empty or unparseable
//! bound is inactive and never excludes anything.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::amount::resolve_amount;
use crate::dates::parse_calendar_date;
use crate::transaction::{Category, Transaction};

/// Category selector; `All` disables the category predicate
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse the selector values used by the UI: `all`, `Money In`, `Money Out`, `Other`.
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(CategoryFilter::All);
        }
        s.parse::<Category>().ok().map(CategoryFilter::Only)
    }
}

/// User-entered filter state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub from: String,
    pub to: String,
    pub min: String,
    pub max: String,
}

impl FilterCriteria {
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min = min.into();
        self
    }

    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = max.into();
        self
    }

    /// True when no predicate would exclude anything.
    pub fn is_default(&self) -> bool {
        self.compile() == CompiledFilter::default()
    }

    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            category: match self.category {
                CategoryFilter::All => None,
                CategoryFilter::Only(c) => Some(c),
            },
            from: date_bound("from", &self.from),
            to: date_bound("to", &self.to),
            min: amount_bound("min", &self.min),
            max: amount_bound("max", &self.max),
        }
    }
}

fn date_bound(name: &str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        debug!("ignoring unparseable {name} date bound {raw:?}");
    }
    parsed
}

fn amount_bound(name: &str, raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!("ignoring unparseable {name} amount bound {raw:?}");
            None
        }
    }
}

/// Typed, ready-to-evaluate form of [`FilterCriteria`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompiledFilter {
    pub category: Option<Category>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl CompiledFilter {
    pub fn has_date_bound(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_category(txn) && self.matches_date(txn) && self.matches_amount(txn)
    }

    fn matches_category(&self, txn: &Transaction) -> bool {
        match self.category {
            None => true,
            Some(wanted) => txn.category == Some(wanted),
        }
    }

    /// A transaction without a parseable date passes any date bound.
    fn matches_date(&self, txn: &Transaction) -> bool {
        if !self.has_date_bound() {
            return true;
        }
        let Some(date) = txn.date.as_deref().and_then(parse_calendar_date) else {
            return true;
        };
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }

    /// An undetermined amount passes any amount bound.
    fn matches_amount(&self, txn: &Transaction) -> bool {
        let Some(amt) = resolve_amount(txn) else {
            return true;
        };
        if self.min.is_some_and(|min| amt < min) {
            return false;
        }
        if self.max.is_some_and(|max| amt > max) {
            return false;
        }
        true
    }
}

/// Stable selection of the transactions passing `criteria`.
pub fn filter_transactions<'a>(
    txns: &'a [Transaction],
    criteria: &FilterCriteria,
) -> Vec<&'a Transaction> {
    let compiled = criteria.compile();
    txns.iter().filter(|t| compiled.matches(t)).collect()
}
