use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::StatementResult;
use crate::reconcile;

/// A single ledger entry: purchase, payment/credit or synthesized fee.
///
/// `amount` is negative for payments and credits, positive for charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u32,
    pub date: NaiveDate,
    pub description: String,
    pub amount_str: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Transactions,
    Payments,
    Fees,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Transactions => "transactions",
            TransactionCategory::Payments => "payments",
            TransactionCategory::Fees => "fees",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed and reconciled monthly statement.
///
/// `total_payments` carries the sign of the payments ledger (negative), so
/// every category reconciles by plain summation against its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub previous_balance: Decimal,
    pub total_payments: Decimal,
    pub total_fees: Decimal,
    pub total_transactions: Decimal,
    pub new_balance: Decimal,
    pub payments: Vec<Transaction>,
    pub transactions: Vec<Transaction>,
    pub fees: Vec<Transaction>,
}

impl StatementRecord {
    pub fn entries(&self, category: TransactionCategory) -> &[Transaction] {
        match category {
            TransactionCategory::Transactions => &self.transactions,
            TransactionCategory::Payments => &self.payments,
            TransactionCategory::Fees => &self.fees,
        }
    }

    pub fn total(&self, category: TransactionCategory) -> Decimal {
        match category {
            TransactionCategory::Transactions => self.total_transactions,
            TransactionCategory::Payments => self.total_payments,
            TransactionCategory::Fees => self.total_fees,
        }
    }

    /// Re-runs the reconciliation checks, e.g. on a record loaded from JSON.
    pub fn reconcile(&self) -> StatementResult<()> {
        reconcile::reconcile(self)
    }
}
