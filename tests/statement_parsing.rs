use capitalone_statement_rs::errors::StatementParseError;
use capitalone_statement_rs::{
    CapitalOneParser, Page, Parser, ParserBuilder, ParserConfig, StatementFormat, StatementRecord,
    TextRun, TransactionCategory,
};
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use std::str::FromStr;

const STATEMENT: &str = include_str!("../demos/statement.txt");
const HEADER: &str = "DEC. 15 - JAN. 14, 2024  31 Days in Billing Cycle";

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn parse(text: &str) -> Result<StatementRecord, StatementParseError> {
    ParserBuilder::new()
        .content(text)
        .format(StatementFormat::CapitalOne)
        .parse()
}

#[fixture]
fn record() -> StatementRecord {
    parse(STATEMENT).unwrap()
}

#[rstest]
fn test_billing_period(record: StatementRecord) {
    assert_eq!(record.start_date, Some(date(2023, 12, 15)));
    assert_eq!(record.end_date, Some(date(2024, 1, 14)));
}

#[rstest]
fn test_summary_totals(record: StatementRecord) {
    assert_eq!(record.previous_balance, dec("1482.16"));
    assert_eq!(record.total_payments, dec("-1502.15"));
    assert_eq!(record.total_fees, dec("51.47"));
    assert_eq!(record.total_transactions, dec("742.92"));
    assert_eq!(record.new_balance, dec("774.40"));
}

#[rstest]
fn test_transactions(record: StatementRecord) {
    let ids: Vec<u32> = record.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 6, 9, 10]);

    let first = &record.transactions[0];
    assert_eq!(first.date, date(2023, 12, 16));
    assert_eq!(first.description, "AMAZON.COM*RT4KL0 AMZN.COM/BILLWA");
    assert_eq!(first.amount_str, "$64.99");

    let trader_joes = record.transactions.iter().find(|t| t.id == 6).unwrap();
    assert_eq!(trader_joes.date, date(2024, 1, 2));
    assert_eq!(trader_joes.description, "TRADER JOE'S #654 ALEXANDRIA VA");
}

#[rstest]
fn test_wrapped_amount_is_recovered(record: StatementRecord) {
    let delta = record.transactions.iter().find(|t| t.id == 4).unwrap();

    assert_eq!(delta.date, date(2023, 12, 23));
    assert_eq!(delta.description, "DELTA AIR LINES 0062383947154 ATLANTA GA RESERVATION");
    assert_eq!(delta.amount, dec("412.40"));
}

#[rstest]
fn test_payments_are_negative(record: StatementRecord) {
    assert_eq!(record.payments.len(), 2);
    assert_eq!(record.payments[0].id, 5);
    assert_eq!(record.payments[0].amount, dec("-1482.16"));
    assert_eq!(record.payments[0].amount_str, "($1,482.16)");
    assert_eq!(record.payments[1].date, date(2024, 1, 4));
    assert!(record.payments.iter().all(|p| p.amount < Decimal::ZERO));
    assert!(record.transactions.iter().all(|t| t.amount >= Decimal::ZERO));
}

#[rstest]
fn test_fees_are_synthesized_once(record: StatementRecord) {
    assert_eq!(record.fees.len(), 2);

    assert_eq!(record.fees[0].id, 1);
    assert_eq!(record.fees[0].description, "CAPITAL ONE MEMBER FEE");
    assert_eq!(record.fees[0].amount, dec("39.00"));
    assert_eq!(record.fees[0].date, date(2024, 1, 14));

    assert_eq!(record.fees[1].id, 2);
    assert_eq!(record.fees[1].description, "INTEREST CHARGE:PURCHASES");
    assert_eq!(record.fees[1].amount, dec("12.47"));

    assert!(record.transactions.iter().all(|t| t.description != "CAPITAL ONE MEMBER FEE"));
}

#[rstest]
fn test_lists_strictly_sorted(record: StatementRecord) {
    for category in [
        TransactionCategory::Transactions,
        TransactionCategory::Payments,
        TransactionCategory::Fees,
    ] {
        let entries = record.entries(category);
        assert!(entries.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}

#[rstest]
fn test_record_reconciles(record: StatementRecord) {
    let sum = |entries: &[capitalone_statement_rs::Transaction]| -> Decimal {
        entries.iter().map(|t| t.amount).sum()
    };

    assert_eq!(sum(&record.transactions).round_dp(2), record.total_transactions.round_dp(2));
    assert_eq!(sum(&record.payments).round_dp(2), record.total_payments.round_dp(2));
    assert!(record.reconcile().is_ok());
}

#[rstest]
fn test_json_shape(record: StatementRecord) {
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["start_date"], "2023-12-15");
    assert_eq!(json["total_transactions"], "742.92");
    assert_eq!(json["payments"][0]["amount_str"], "($1,482.16)");
    assert_eq!(json["fees"][1]["description"], "INTEREST CHARGE:PURCHASES");

    let roundtrip: StatementRecord = serde_json::from_value(json).unwrap();
    assert_eq!(roundtrip, record);
}

#[rstest]
#[case("$742.92", "$742.93", TransactionCategory::Transactions)]
#[case("$742.92", "$742.91", TransactionCategory::Transactions)]
#[case("$1,502.15", "$1,502.16", TransactionCategory::Payments)]
#[case("$51.47 ", "$51.48 ", TransactionCategory::Fees)]
fn test_perturbed_total_fails(
    #[case] from: &str,
    #[case] to: &str,
    #[case] expected_category: TransactionCategory,
) {
    let perturbed = STATEMENT.replacen(from, to, 1);

    match parse(&perturbed) {
        Err(StatementParseError::Reconciliation { category, expected, actual }) => {
            assert_eq!(category, expected_category);
            assert_ne!(expected.map(|e| e.round_dp(2)), Some(actual.round_dp(2)));
        }
        other => panic!("expected reconciliation failure, got {other:?}"),
    }
}

#[test]
fn test_dropped_transaction_fails() {
    let perturbed = STATEMENT.replace("$15.49", "");
    assert!(matches!(
        parse(&perturbed),
        Err(StatementParseError::Reconciliation {
            category: TransactionCategory::Transactions,
            ..
        })
    ));
}

#[test]
fn test_flipped_credit_fails() {
    let perturbed = STATEMENT.replace("($19.99)", " $19.99 ");
    assert!(matches!(parse(&perturbed), Err(StatementParseError::Reconciliation { .. })));
}

#[test]
fn test_missing_summary_fails() {
    let summary_line = STATEMENT
        .lines()
        .find(|line| line.starts_with("$1,482.16"))
        .unwrap();
    let perturbed = STATEMENT.replace(summary_line, "");

    assert!(matches!(
        parse(&perturbed),
        Err(StatementParseError::Reconciliation { expected: None, .. })
    ));
}

#[test]
fn test_transaction_before_header_fails() {
    let mut pages = Page::split_text(&STATEMENT.replace(HEADER, ""));
    pages[1].lines.insert(0, HEADER.to_string());

    let result = ParserBuilder::new()
        .pages(pages)
        .format(StatementFormat::CapitalOne)
        .parse();

    assert!(matches!(result, Err(StatementParseError::BillingCycleUndetermined)));
}

#[test]
fn test_header_split_across_text_runs() {
    let mut pages = Page::split_text(&STATEMENT.replace(HEADER, ""));
    pages[0].runs = vec![
        TextRun::new("Capital One", 300.0, 760.0),
        TextRun::new("DEC. 15 - ", 40.0, 735.0),
        TextRun::new("JAN. 14, 2024", 92.0, 735.0),
        TextRun::new("31 Days in Billing Cycle", 170.0, 735.0),
    ];

    let record = ParserBuilder::new().pages(pages).parse().unwrap();

    assert_eq!(record.start_date, Some(date(2023, 12, 15)));
    assert_eq!(record.transactions[0].date, date(2023, 12, 16));
}

#[test]
fn test_parser_is_reusable() {
    let parser = CapitalOneParser::new(ParserConfig::default()).unwrap();
    let pages = Page::split_text(STATEMENT);

    let first = parser.parse(&pages).unwrap();
    let second = parser.parse(&pages).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reconcile_rejects_tampered_record() {
    let mut record = parse(STATEMENT).unwrap();
    record.payments.pop();

    assert!(matches!(
        record.reconcile(),
        Err(StatementParseError::Reconciliation {
            category: TransactionCategory::Payments,
            ..
        })
    ));
}
