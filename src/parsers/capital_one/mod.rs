//! Capital One monthly statement layout.

mod billing;
mod columns;
pub mod dto;
mod parser;
mod patterns;
pub mod types;

pub mod prelude {
    pub use super::dto::{SummaryTotals, TransactionLine};
    pub use super::parser::CapitalOneParser;
    pub use super::types::{BillingPeriod, StatementAmount};
}
