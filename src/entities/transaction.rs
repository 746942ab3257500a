//! Sales and withdrawal transaction records.
//!
//! A sale carries zero or more commission entries keyed by beneficiary uid.
//! Aggregate totals (total sales, total commissions, total withdrawals) are
//! never stored; [`crate::core::sales`] recomputes them by folding over the
//! full collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Kind of a transaction record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// A product sale with commission entries
    #[default]
    Sale,
    /// A commission withdrawal by a seller
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Withdrawal => "withdrawal",
        };
        f.write_str(text)
    }
}

/// A sale or withdrawal transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    /// Transaction id (the collection key)
    pub id: String,
    /// Whether this is a sale or a withdrawal
    pub kind: TransactionKind,
    /// Sale amount, or amount withdrawn
    pub amount: f64,
    /// Uid of the seller the transaction belongs to
    pub seller_uid: String,
    /// When the transaction happened
    pub date: Option<DateTime<Utc>>,
    /// Commission entries keyed by beneficiary uid (empty for withdrawals)
    pub commissions: HashMap<String, f64>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Transaction {
    /// Sum of all commission entries on this transaction.
    #[must_use]
    pub fn commission_total(&self) -> f64 {
        self.commissions.values().sum()
    }
}
