use chrono::{Month, NaiveDate};
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{BillingPeriod, StatementAmount, parse_month};
use crate::errors::{StatementParseError, StatementResult};
use crate::types::Transaction;

/// Date-range header fields exactly as printed, e.g. `DEC. 15 - JAN. 14, 2024`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingHeader {
    start_month: String,
    start_day: String,
    end_month: String,
    end_day: String,
    year: String,
}

impl BillingHeader {
    pub(super) fn capture(pattern: &Regex, text: &str) -> Option<Self> {
        pattern.captures(text).map(|caps| Self {
            start_month: caps["start_month"].to_string(),
            start_day: caps["start_day"].to_string(),
            end_month: caps["end_month"].to_string(),
            end_day: caps["end_day"].to_string(),
            year: caps["year"].to_string(),
        })
    }
}

impl TryFrom<BillingHeader> for BillingPeriod {
    type Error = StatementParseError;

    fn try_from(header: BillingHeader) -> Result<Self, Self::Error> {
        let invalid = || {
            StatementParseError::InvalidDate(format!(
                "{}. {} - {}. {}, {}",
                header.start_month, header.start_day, header.end_month, header.end_day, header.year
            ))
        };

        let start_month = parse_month(&header.start_month)?;
        let end_month = parse_month(&header.end_month)?;
        let start_day: u32 = header.start_day.parse().map_err(|_| invalid())?;
        let end_day: u32 = header.end_day.parse().map_err(|_| invalid())?;
        let year: i32 = header.year.parse().map_err(|_| invalid())?;

        let dec_from_prev_year =
            start_month == Month::December && end_month == Month::January;

        let period = BillingPeriod {
            year,
            dec_from_prev_year,
            start_date: NaiveDate::from_ymd_opt(
                if dec_from_prev_year { year - 1 } else { year },
                start_month.number_from_month(),
                start_day,
            )
            .ok_or_else(invalid)?,
            end_date: NaiveDate::from_ymd_opt(year, end_month.number_from_month(), end_day)
                .ok_or_else(invalid)?,
        };

        Ok(period)
    }
}

/// A ledger row that matched the transaction pattern, before date resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    pub id: u32,
    pub day: u32,
    pub month: String,
    pub description: String,
    pub amount: StatementAmount,
}

impl TransactionLine {
    pub(super) fn capture(pattern: &Regex, text: &str) -> Option<Self> {
        let caps = pattern.captures(text)?;

        // ids and days that overflow are not ledger rows
        Some(Self {
            id: caps["id"].parse().ok()?,
            day: caps["day"].parse().ok()?,
            month: caps["month"].to_string(),
            description: caps["description"].to_string(),
            amount: caps["amount"].into(),
        })
    }

    pub fn into_transaction(self, period: &BillingPeriod) -> StatementResult<Transaction> {
        let month = parse_month(&self.month)?;
        let date = period.resolve(self.day, month)?;
        let amount = self.amount.decode()?;

        Ok(Transaction {
            id: self.id,
            date,
            description: self.description,
            amount_str: self.amount.as_str().to_string(),
            amount,
        })
    }
}

/// The five headline figures, in printed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub previous_balance: Decimal,
    /// Negated from the printed figure so it matches the payments ledger sign.
    pub total_payments: Decimal,
    pub total_fees: Decimal,
    pub total_transactions: Decimal,
    pub new_balance: Decimal,
}

impl SummaryTotals {
    pub(super) fn from_tokens(tokens: [&str; 5]) -> StatementResult<Self> {
        let [previous, payments, fees, transactions, new] =
            tokens.map(|token| StatementAmount::from(token).decode());

        Ok(Self {
            previous_balance: previous?,
            total_payments: -payments?,
            total_fees: fees?,
            total_transactions: transactions?,
            new_balance: new?,
        })
    }
}

pub(super) fn amount_from(caps: &Captures<'_>, group: &str) -> Option<StatementAmount> {
    caps.name(group).map(|m| StatementAmount::from(m.as_str()))
}
