use std::mem;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::billing;
use super::columns::split_and_repair;
use super::dto::{SummaryTotals, TransactionLine, amount_from};
use super::patterns::Patterns;
use super::types::BillingPeriod;
use crate::config::ParserConfig;
use crate::errors::{StatementParseError, StatementResult};
use crate::pages::Page;
use crate::parsers::traits::Parser;
use crate::reconcile::category_sum;
use crate::types::{StatementRecord, Transaction, TransactionCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsePhase {
    AwaitingBillingPeriod,
    AwaitingSummary,
    Accumulating,
    Reconciled,
}

/// Mutable state of a single parse; never outlives `CapitalOneParser::parse`.
#[derive(Debug)]
struct ParserState {
    phase: ParsePhase,
    period: Option<BillingPeriod>,
    summary: Option<SummaryTotals>,
    transactions: Vec<Transaction>,
    payments: Vec<Transaction>,
    fees: Vec<Transaction>,
}

impl ParserState {
    fn new() -> Self {
        Self {
            phase: ParsePhase::AwaitingBillingPeriod,
            period: None,
            summary: None,
            transactions: Vec::new(),
            payments: Vec::new(),
            fees: Vec::new(),
        }
    }

    fn period(&self) -> StatementResult<&BillingPeriod> {
        self.period
            .as_ref()
            .ok_or(StatementParseError::BillingCycleUndetermined)
    }

    fn advance(&mut self) {
        let next = match (self.period, self.summary) {
            (None, _) => ParsePhase::AwaitingBillingPeriod,
            (Some(_), None) => ParsePhase::AwaitingSummary,
            (Some(_), Some(_)) => ParsePhase::Accumulating,
        };
        self.set_phase(next);
    }

    fn set_phase(&mut self, next: ParsePhase) {
        if next != self.phase {
            debug!(from = ?self.phase, to = ?next, "parse phase changed");
            self.phase = next;
        }
    }

    fn push(&mut self, trx: Transaction) {
        if trx.amount >= Decimal::ZERO {
            self.transactions.push(trx);
        } else {
            self.payments.push(trx);
        }
    }

    /// Sorts every ledger by id and checks it against the summary block.
    fn finish(&mut self) -> StatementResult<StatementRecord> {
        for list in [&mut self.transactions, &mut self.payments, &mut self.fees] {
            list.sort_by_key(|trx| trx.id);
        }

        let Some(summary) = self.summary else {
            return Err(StatementParseError::Reconciliation {
                category: TransactionCategory::Transactions,
                expected: None,
                actual: category_sum(&self.transactions),
            });
        };

        let record = StatementRecord {
            start_date: self.period.map(|p| p.start_date),
            end_date: self.period.map(|p| p.end_date),
            previous_balance: summary.previous_balance,
            total_payments: summary.total_payments,
            total_fees: summary.total_fees,
            total_transactions: summary.total_transactions,
            new_balance: summary.new_balance,
            payments: mem::take(&mut self.payments),
            transactions: mem::take(&mut self.transactions),
            fees: mem::take(&mut self.fees),
        };
        record.reconcile()?;

        self.set_phase(ParsePhase::Reconciled);
        debug!(
            transactions = record.transactions.len(),
            payments = record.payments.len(),
            fees = record.fees.len(),
            "statement reconciled"
        );

        Ok(record)
    }
}

/// Parser for Capital One monthly credit card statements.
///
/// Holds the layout configuration and the patterns compiled from it; each
/// call to [`Parser::parse`] runs with its own state, so one instance can
/// parse any number of statements.
#[derive(Debug, Clone)]
pub struct CapitalOneParser {
    config: ParserConfig,
    patterns: Patterns,
}

impl CapitalOneParser {
    pub fn new(config: ParserConfig) -> StatementResult<Self> {
        config.validate()?;
        let patterns = Patterns::new(&config)?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn parse_page(&self, state: &mut ParserState, page_index: usize, page: &Page) -> StatementResult<()> {
        if state.period.is_none() {
            state.period = billing::resolve(&self.patterns.billing_header, page)?;
            state.advance();
        }

        let lines: Vec<&str> = page
            .lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty())
            .collect();

        for (idx, line) in lines.iter().enumerate() {
            let next_line = lines.get(idx + 1).copied();
            self.parse_line(state, page_index, line, next_line)?;
        }

        Ok(())
    }

    fn parse_line(
        &self,
        state: &mut ParserState,
        page_index: usize,
        line: &str,
        next_line: Option<&str>,
    ) -> StatementResult<()> {
        if state.summary.is_none() {
            if let Some(summary) = self.extract_summary(line)? {
                debug!(?summary, "summary block found");
                state.summary = Some(summary);
                state.advance();
            }
        }

        self.extract_fees(state, line)?;

        let columns = self.config.layout.columns_for(page_index);
        for column in split_and_repair(&self.patterns, columns, line, next_line) {
            if let Some(trx) = self.parse_transaction(state, &column)? {
                state.push(trx);
            }
        }

        Ok(())
    }

    fn extract_summary(&self, line: &str) -> StatementResult<Option<SummaryTotals>> {
        let tokens: Vec<&str> = self
            .patterns
            .amount
            .find_iter(line)
            .map(|m| m.as_str())
            .collect();

        match <[&str; 5]>::try_from(tokens.as_slice()) {
            Ok(tokens) => SummaryTotals::from_tokens(tokens).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn extract_fees(&self, state: &mut ParserState, line: &str) -> StatementResult<()> {
        let labels = [
            (&self.patterns.fees, &self.config.member_fee_description),
            (&self.patterns.interest, &self.config.interest_description),
        ];

        for (pattern, description) in labels {
            let Some(amount_str) = pattern
                .captures(line)
                .and_then(|caps| amount_from(&caps, "amount"))
            else {
                continue;
            };

            let amount = amount_str.decode()?;
            if amount.is_zero() {
                continue;
            }

            let end_date = state.period()?.end_date;
            let trx = Transaction {
                id: state.fees.len() as u32 + 1,
                date: end_date,
                description: description.clone(),
                amount_str: amount_str.as_str().to_string(),
                amount,
            };
            debug!(id = trx.id, description = %trx.description, amount = %trx.amount, "fee synthesized");
            state.fees.push(trx);
        }

        Ok(())
    }

    fn parse_transaction(&self, state: &ParserState, column: &str) -> StatementResult<Option<Transaction>> {
        let Some(raw) = TransactionLine::capture(&self.patterns.transaction, column) else {
            return Ok(None);
        };

        // member fees are taken from the fees summary line instead
        if raw.description == self.config.member_fee_description {
            trace!(id = raw.id, "skipping member fee ledger row");
            return Ok(None);
        }

        let period = state.period()?;
        raw.into_transaction(period).map(Some)
    }
}

impl Parser for CapitalOneParser {
    type Output = StatementRecord;

    fn is_supported(&self, pages: &[Page]) -> bool {
        pages.first().is_some_and(|page| {
            page.contains("Capital One")
                || page
                    .lines
                    .iter()
                    .any(|line| self.patterns.billing_header.is_match(line))
        })
    }

    fn parse(&self, pages: &[Page]) -> StatementResult<Self::Output> {
        let mut state = ParserState::new();
        for (page_index, page) in pages.iter().enumerate() {
            trace!(page_index, lines = page.lines.len(), "parsing page");
            self.parse_page(&mut state, page_index, page)?;
        }

        state.finish()
    }
}
