//! Statement layout and label configuration.
//!
//! Column offsets are the one layout-dependent piece of the parser; they are
//! measured in characters and differ between the first page (summary block
//! plus a single ledger) and the following pages (two ledgers side by side).

use serde::{Deserialize, Serialize};

use crate::errors::{StatementParseError, StatementResult};

/// Horizontal character range of a text line, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    /// `None` runs to the end of the line.
    #[serde(default)]
    pub end: Option<usize>,
}

impl ColumnRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub const fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Slices `line` by character offsets, clamped to the line length.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let byte_at = |offset: usize| {
            line.char_indices()
                .nth(offset)
                .map(|(idx, _)| idx)
                .unwrap_or(line.len())
        };

        let start = byte_at(self.start);
        let end = self.end.map(byte_at).unwrap_or(line.len()).max(start);

        &line[start..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub first_page: Vec<ColumnRange>,
    pub other_pages: Vec<ColumnRange>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            first_page: vec![ColumnRange::new(0, 79)],
            other_pages: vec![ColumnRange::new(0, 79), ColumnRange::open(80)],
        }
    }
}

impl ColumnLayout {
    pub fn columns_for(&self, page_index: usize) -> &[ColumnRange] {
        if page_index == 0 {
            &self.first_page
        } else {
            &self.other_pages
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub layout: ColumnLayout,
    /// Summary label whose amount becomes a member fee entry.
    pub fees_label: String,
    /// Summary label whose amount becomes an interest entry.
    pub interest_label: String,
    pub member_fee_description: String,
    pub interest_description: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            fees_label: "Total Fees This Period".to_string(),
            interest_label: "Total Interest This Period".to_string(),
            member_fee_description: "CAPITAL ONE MEMBER FEE".to_string(),
            interest_description: "INTEREST CHARGE:PURCHASES".to_string(),
        }
    }
}

impl ParserConfig {
    pub fn from_json(content: &str) -> StatementResult<Self> {
        let config: ParserConfig = serde_json::from_str(content)
            .map_err(|e| StatementParseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StatementResult<()> {
        if self.layout.first_page.is_empty() || self.layout.other_pages.is_empty() {
            return Err(StatementParseError::InvalidConfig(
                "every page type needs at least one column".to_string(),
            ));
        }

        let mut all_columns = self.layout.first_page.iter().chain(&self.layout.other_pages);
        if let Some(range) = all_columns.find(|r| r.end.is_some_and(|end| end <= r.start)) {
            return Err(StatementParseError::InvalidConfig(format!(
                "empty column range {}..{:?}",
                range.start, range.end
            )));
        }

        let labels = [
            &self.fees_label,
            &self.interest_label,
            &self.member_fee_description,
            &self.interest_description,
        ];
        if labels.iter().any(|label| label.trim().is_empty()) {
            return Err(StatementParseError::InvalidConfig(
                "labels must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
