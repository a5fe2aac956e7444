use capitalone_statement_rs::errors::StatementParseError;
use capitalone_statement_rs::{ParserBuilder, StatementRecord};
use chrono::NaiveDate;
use std::env;

#[derive(Debug)]
struct MonthlySpend {
    closing_date: Option<NaiveDate>,
    purchases: f64,
    credits: f64,
    fees: f64,
    largest_purchase: Option<String>,
}

impl TryFrom<StatementRecord> for MonthlySpend {
    type Error = StatementParseError;

    fn try_from(record: StatementRecord) -> Result<Self, Self::Error> {
        let largest_purchase = record
            .transactions
            .iter()
            .max_by_key(|trx| trx.amount)
            .map(|trx| format!("{} ({})", trx.description, trx.amount_str));

        Ok(MonthlySpend {
            closing_date: record.end_date,
            purchases: record.total_transactions.to_string().parse().unwrap_or(0.0),
            credits: record.total_payments.to_string().parse().unwrap_or(0.0),
            fees: record.total_fees.to_string().parse().unwrap_or(0.0),
            largest_purchase,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using extracted statement text from demos/statement.txt\n");
        "demos/statement.txt"
    };

    let spend: MonthlySpend = ParserBuilder::new().filename(file_path).parse_into()?;

    if let Some(date) = spend.closing_date {
        println!("Cycle closing {}", date);
    }
    println!("  Purchases: ${:.2}", spend.purchases);
    println!("  Credits:   ${:.2}", spend.credits);
    println!("  Fees:      ${:.2}", spend.fees);
    if let Some(largest) = &spend.largest_purchase {
        println!("  Largest:   {}", largest);
    }

    Ok(())
}
