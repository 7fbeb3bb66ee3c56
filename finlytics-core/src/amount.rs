//! Signed amount resolution.
//!
//! The service reports money in one of three shapes: a pre-signed `amount`
//! (CSV input), or the raw ledger columns `deposit` / `withdrawal` (PDF and
//! OCR input). Exactly one of them is used per transaction, never a sum.

use crate::transaction::Transaction;

/// Resolve a transaction to a single signed amount.
///
/// Priority: `amount` as-is > `deposit` as-is > `-withdrawal` > undetermined.
pub fn resolve_amount(txn: &Transaction) -> Option<f64> {
    if let Some(amount) = txn.amount {
        return Some(amount);
    }
    if let Some(deposit) = txn.deposit {
        return Some(deposit);
    }
    txn.withdrawal.map(|w| -w)
}
