//! Cross-check parsed ledgers against the totals printed in the summary block.

use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::{StatementParseError, StatementResult};
use crate::types::{StatementRecord, Transaction, TransactionCategory};

const CATEGORIES: [TransactionCategory; 3] = [
    TransactionCategory::Transactions,
    TransactionCategory::Payments,
    TransactionCategory::Fees,
];

pub fn reconcile(record: &StatementRecord) -> StatementResult<()> {
    for category in CATEGORIES {
        let entries = record.entries(category);
        check_ordering(category, entries)?;
        check_total(category, record.total(category), entries)?;
    }

    Ok(())
}

pub(crate) fn category_sum(entries: &[Transaction]) -> Decimal {
    entries.iter().map(|trx| trx.amount).sum()
}

fn check_total(
    category: TransactionCategory,
    expected: Decimal,
    entries: &[Transaction],
) -> StatementResult<()> {
    let actual = category_sum(entries);

    if actual.round_dp(2) != expected.round_dp(2) {
        return Err(StatementParseError::Reconciliation {
            category,
            expected: Some(expected),
            actual,
        });
    }

    debug!(%category, count = entries.len(), total = %actual, "category reconciled");
    Ok(())
}

// Entries are expected sorted by id already; equal neighbours are duplicates.
fn check_ordering(category: TransactionCategory, entries: &[Transaction]) -> StatementResult<()> {
    match entries.windows(2).find(|pair| pair[0].id >= pair[1].id) {
        Some(pair) => Err(StatementParseError::DuplicateTransactionId {
            category,
            id: pair[1].id,
        }),
        None => Ok(()),
    }
}
