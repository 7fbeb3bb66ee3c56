//! Decoding of the parsing service's JSON body.
//!
//! Expected shape:
//!
//! ```json
//! { "count": 2, "moneyIn": [...], "moneyOut": [...], "other": [...],
//!   "raw": [{ "date": "2024-01-05", "description": "...", "amount": null,
//!             "withdrawal": 100.0, "deposit": null, "balance": 53.7,
//!             "category": "Money Out" }],
//!   "ocrEnabled": false }
//! ```
//!
//! Transaction fields are read loosely: a field of the wrong JSON type is
//! dropped (becomes `None`) instead of being coerced. A numeric string such
//! as `"12.50"` is not a number.

use finlytics_core::{Category, ParsedResult, Transaction};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    #[serde(default)]
    count: Value,
    #[serde(default)]
    money_in: Value,
    #[serde(default)]
    money_out: Value,
    #[serde(default)]
    other: Value,
    raw: Vec<Value>,
    #[serde(default)]
    ocr_enabled: Value,
}

/// Decode a full `/upload` response body.
///
/// `raw` is required and must be a list. The bucket lists, `count` and
/// `ocrEnabled` are read loosely: a missing or mistyped bucket is empty, and
/// a `count` that is not a non-negative whole number falls back to the
/// decoded raw length.
pub fn decode_parsed_result(body: &[u8]) -> Result<ParsedResult, serde_json::Error> {
    let wire: WireResult = serde_json::from_slice(body)?;
    let raw = decode_list("raw", &wire.raw);
    let count = match count_field(&wire.count) {
        Some(c) => c,
        None => raw.len(),
    };
    Ok(ParsedResult {
        count,
        money_in: decode_bucket("moneyIn", &wire.money_in),
        money_out: decode_bucket("moneyOut", &wire.money_out),
        other: decode_bucket("other", &wire.other),
        raw,
        ocr_enabled: wire.ocr_enabled.as_bool(),
    })
}

fn count_field(value: &Value) -> Option<usize> {
    if value.is_null() {
        return None;
    }
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    });
    if count.is_none() {
        debug!("ignoring unusable count: {value}");
    }
    count.map(|c| c as usize)
}

fn decode_bucket(list: &str, value: &Value) -> Vec<Transaction> {
    match value {
        Value::Array(values) => decode_list(list, values),
        Value::Null => Vec::new(),
        other => {
            debug!("{list} is not a list: {other}");
            Vec::new()
        }
    }
}

fn decode_list(list: &str, values: &[Value]) -> Vec<Transaction> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let txn = decode_transaction(v);
            if txn.is_none() {
                warn!("{list}[{i}] is not an object; skipped");
            }
            txn
        })
        .collect()
}

/// Decode one transaction object. Returns `None` for non-objects.
pub fn decode_transaction(value: &Value) -> Option<Transaction> {
    let obj = value.as_object()?;
    Some(Transaction {
        date: text_field(obj, "date"),
        description: text_field(obj, "description"),
        amount: number_field(obj, "amount"),
        deposit: number_field(obj, "deposit"),
        withdrawal: number_field(obj, "withdrawal"),
        balance: number_field(obj, "balance"),
        category: category_field(obj),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        other => {
            debug!("dropping non-string {key}: {other}");
            None
        }
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::Null => None,
        other => {
            debug!("dropping non-numeric {key}: {other}");
            None
        }
    }
}

fn category_field(obj: &Map<String, Value>) -> Option<Category> {
    match obj.get("category")? {
        Value::String(s) => {
            let c = Category::from_label(s);
            if c.is_none() {
                debug!("dropping unknown category {s:?}");
            }
            c
        }
        Value::Null => None,
        other => {
            debug!("dropping non-string category: {other}");
            None
        }
    }
}
