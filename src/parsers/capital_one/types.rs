use crate::errors::{StatementParseError, StatementResult};
use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency token as printed on the statement: `$1,234.56` or `($1,234.56)`.
///
/// Parenthesized tokens are credits and decode to negative values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementAmount(String);

impl StatementAmount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> StatementResult<Decimal> {
        let token = self.0.trim();
        let digits: String = token
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        let magnitude = digits
            .parse::<Decimal>()
            .map_err(|_| StatementParseError::InvalidAmount(self.0.clone()))?;

        if token.starts_with('(') {
            Ok(-magnitude)
        } else {
            Ok(magnitude)
        }
    }
}

impl From<String> for StatementAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<StatementAmount> for Decimal {
    type Error = StatementParseError;

    fn try_from(amount: StatementAmount) -> Result<Self, Self::Error> {
        amount.decode()
    }
}

pub(crate) fn parse_month(abbrev: &str) -> StatementResult<Month> {
    abbrev
        .trim()
        .parse::<Month>()
        .map_err(|_| StatementParseError::InvalidDate(format!("unknown month {:?}", abbrev)))
}

/// Billing cycle printed in the statement header.
///
/// `year` is the printed year, which belongs to the closing month. A cycle
/// opening in December and closing in January starts in `year - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub year: i32,
    pub dec_from_prev_year: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BillingPeriod {
    pub fn year_for(&self, month: Month) -> i32 {
        if month == Month::December && self.dec_from_prev_year {
            self.year - 1
        } else {
            self.year
        }
    }

    /// Resolves a `DD MMM` ledger date to a calendar date inside this cycle.
    pub fn resolve(&self, day: u32, month: Month) -> StatementResult<NaiveDate> {
        let year = self.year_for(month);
        NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(|| {
            StatementParseError::InvalidDate(format!("{} {:?} {}", day, month, year))
        })
    }
}
