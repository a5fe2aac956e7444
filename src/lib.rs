//! Parse and reconcile Capital One credit card statements from extracted PDF text.
//!
//! The PDF itself is decoded elsewhere (for example with `pdftotext -layout`);
//! this crate takes the per-page text, recovers the billing cycle, the summary
//! block and both ledgers, and refuses any statement whose ledgers do not add
//! up to the printed totals.
//!
//! ```rust,ignore
//! use capitalone_statement_rs::ParserBuilder;
//!
//! let statement = ParserBuilder::new()
//!     .content(&extracted_text)
//!     .parse()?;
//! ```

mod builder;
mod reconcile;
mod types;

pub mod config;
pub mod errors;
pub mod pages;
pub mod parsers;

pub use builder::{ParserBuilder, StatementFormat};
pub use config::{ColumnLayout, ColumnRange, ParserConfig};
pub use pages::{Page, TextRun, TextRunVisitor};
pub use parsers::prelude::*;
pub use reconcile::reconcile;
pub use types::{StatementRecord, Transaction, TransactionCategory};
