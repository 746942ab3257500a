//! Sales and commission aggregation.
//!
//! The store never holds aggregate totals; every dashboard fold recomputes
//! them over the full mirrored transactions collection on each load.

use crate::entities::{Record, TransactionKind};
use std::collections::HashMap;

/// Fold of the full transactions collection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesTotals {
    /// Sum of all sale amounts
    pub total_sales: f64,
    /// Sum of every commission entry across all sales
    pub total_commissions: f64,
    /// Sum of all withdrawal amounts
    pub total_withdrawals: f64,
}

/// Folds the transactions collection into its aggregate totals.
#[must_use]
pub fn totals(records: &[Record]) -> SalesTotals {
    records
        .iter()
        .filter_map(|record| match record {
            Record::Transaction(tx) => Some(tx),
            _ => None,
        })
        .fold(SalesTotals::default(), |mut acc, tx| {
            match tx.kind {
                TransactionKind::Sale => {
                    acc.total_sales += tx.amount;
                    acc.total_commissions += tx.commission_total();
                }
                TransactionKind::Withdrawal => acc.total_withdrawals += tx.amount,
            }
            acc
        })
}

/// Total commission earned per beneficiary uid across all sales.
#[must_use]
pub fn commission_totals(records: &[Record]) -> HashMap<String, f64> {
    let mut by_beneficiary: HashMap<String, f64> = HashMap::new();
    for record in records {
        if let Record::Transaction(tx) = record {
            for (uid, amount) in &tx.commissions {
                *by_beneficiary.entry(uid.clone()).or_default() += amount;
            }
        }
    }
    by_beneficiary
}

/// Commission earned by one beneficiary across all sales.
#[must_use]
pub fn commission_for(records: &[Record], uid: &str) -> f64 {
    records
        .iter()
        .filter_map(|record| match record {
            Record::Transaction(tx) => tx.commissions.get(uid),
            _ => None,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sale_record, withdrawal_record};

    #[test]
    fn test_totals_fold_sales_commissions_withdrawals() {
        let records = vec![
            sale_record("s1", 1000.0, &[("uidA", 50.0), ("uidB", 20.0)]),
            sale_record("s2", 500.0, &[("uidA", 25.0)]),
            withdrawal_record("w1", 40.0),
        ];
        let totals = totals(&records);
        assert_eq!(totals.total_sales, 1500.0);
        assert_eq!(totals.total_commissions, 95.0);
        assert_eq!(totals.total_withdrawals, 40.0);
    }

    #[test]
    fn test_commission_totals_key_by_beneficiary() {
        let records = vec![
            sale_record("s1", 1000.0, &[("uidA", 50.0), ("uidB", 20.0)]),
            sale_record("s2", 500.0, &[("uidA", 25.0)]),
        ];
        let by_uid = commission_totals(&records);
        assert_eq!(by_uid["uidA"], 75.0);
        assert_eq!(by_uid["uidB"], 20.0);
        assert_eq!(commission_for(&records, "uidA"), 75.0);
        assert_eq!(commission_for(&records, "nobody"), 0.0);
    }

    #[test]
    fn test_empty_collection_folds_to_zero() {
        assert_eq!(totals(&[]), SalesTotals::default());
    }
}
