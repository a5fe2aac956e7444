use regex::Regex;

use crate::config::ParserConfig;
use crate::errors::StatementResult;

const AMOUNT: &str = r"\(?\$[\d,]+\.\d\d\)?";

/// Compiled patterns for one parser instance.
#[derive(Debug, Clone)]
pub(crate) struct Patterns {
    pub(crate) billing_header: Regex,
    pub(crate) amount: Regex,
    pub(crate) amount_only: Regex,
    pub(crate) fees: Regex,
    pub(crate) interest: Regex,
    pub(crate) transaction: Regex,
}

impl Patterns {
    pub(crate) fn new(config: &ParserConfig) -> StatementResult<Self> {
        Ok(Self {
            billing_header: Regex::new(concat!(
                r"(?P<start_month>\w{3})\. (?P<start_day>\d\d) - ",
                r"(?P<end_month>\w{3})\. (?P<end_day>\d\d), (?P<year>\d{4})"
            ))?,
            amount: Regex::new(AMOUNT)?,
            amount_only: Regex::new(&format!(r"^ *{AMOUNT} *$"))?,
            fees: labelled_amount(&config.fees_label)?,
            interest: labelled_amount(&config.interest_label)?,
            transaction: Regex::new(&format!(
                r"^ *(?P<id>\d+) +(?P<day>\d\d) (?P<month>[A-Z]{{3}}) (?P<description>.+[^ ]) +(?P<amount>{AMOUNT}) *$"
            ))?,
        })
    }
}

fn labelled_amount(label: &str) -> StatementResult<Regex> {
    Ok(Regex::new(&format!(
        r"{} +(?P<amount>{AMOUNT})",
        regex::escape(label.trim())
    ))?)
}
