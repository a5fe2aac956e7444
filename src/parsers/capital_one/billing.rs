//! Billing-cycle header recovery.
//!
//! The header is sometimes drawn as several text operations on one visual
//! line (`NOV. 15 - ` then `DEC. 14, 2023`), so every fragment is tested on
//! its own and the fragments of each visual line are also tested joined
//! together. Fragments never join across lines.

use regex::Regex;
use tracing::debug;

use super::dto::BillingHeader;
use super::types::BillingPeriod;
use crate::errors::StatementResult;
use crate::pages::{Page, TextRunVisitor};

pub(super) struct BillingPeriodVisitor<'a> {
    pattern: &'a Regex,
    line: String,
    header: Option<BillingHeader>,
}

impl<'a> BillingPeriodVisitor<'a> {
    pub(super) fn new(pattern: &'a Regex) -> Self {
        Self {
            pattern,
            line: String::new(),
            header: None,
        }
    }

    pub(super) fn finish(mut self) -> Option<BillingHeader> {
        self.end_line();
        self.header
    }
}

impl TextRunVisitor for BillingPeriodVisitor<'_> {
    fn show_text(&mut self, text: &str) {
        if self.header.is_none() {
            self.header = BillingHeader::capture(self.pattern, text);
        }
        self.line.push_str(text);
    }

    fn end_line(&mut self) {
        if self.header.is_none() {
            self.header = BillingHeader::capture(self.pattern, &self.line);
        }
        self.line.clear();
    }
}

/// Looks for the billing-cycle header anywhere on `page`.
pub(super) fn resolve(pattern: &Regex, page: &Page) -> StatementResult<Option<BillingPeriod>> {
    let mut visitor = BillingPeriodVisitor::new(pattern);
    page.walk(&mut visitor);

    match visitor.finish() {
        Some(header) => {
            let period = BillingPeriod::try_from(header)?;
            debug!(
                start = %period.start_date,
                end = %period.end_date,
                dec_from_prev_year = period.dec_from_prev_year,
                "billing period resolved"
            );
            Ok(Some(period))
        }
        None => Ok(None),
    }
}
