use std::fs;

use crate::{
    config::ParserConfig,
    errors::StatementParseError,
    pages::Page,
    parsers::prelude::*,
    types::StatementRecord,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementFormat {
    #[serde(rename = "capital_one")]
    CapitalOne,
}

impl StatementFormat {
    fn parser(&self, config: ParserConfig) -> Result<CapitalOneParser, StatementParseError> {
        match self {
            StatementFormat::CapitalOne => CapitalOneParser::new(config),
        }
    }

    /// Returns the format whose parser accepts `pages`, along with that parser.
    fn detect(
        config: ParserConfig,
        pages: &[Page],
    ) -> Result<(Self, CapitalOneParser), StatementParseError> {
        let parser = StatementFormat::CapitalOne.parser(config)?;
        if parser.is_supported(pages) {
            return Ok((StatementFormat::CapitalOne, parser));
        }

        Err(StatementParseError::UnsupportedFormat)
    }
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    pages: Option<Vec<Page>>,
    format: Option<StatementFormat>,
    config: Option<ParserConfig>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracted statement text, pages separated by form feeds.
    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    /// Pages already split by the text extractor, with optional text runs.
    pub fn pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn format(mut self, format: StatementFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn parse(self) -> Result<StatementRecord, StatementParseError> {
        let config = self.config.unwrap_or_default();

        let pages = match (self.pages, self.content, self.filepath) {
            (Some(pages), _, _) => pages,
            (None, Some(content), _) => Page::split_text(&content),
            (None, None, Some(path)) => Page::split_text(&fs::read_to_string(path)?),
            (None, None, None) => return Err(StatementParseError::MissingContentAndFilepath),
        };

        let parser = match self.format {
            Some(format) => format.parser(config)?,
            None => StatementFormat::detect(config, &pages)?.1,
        };

        parser.parse(&pages)
    }

    pub fn parse_into<T>(self) -> Result<T, StatementParseError>
    where
        T: TryFrom<StatementRecord, Error = StatementParseError>,
    {
        T::try_from(self.parse()?)
    }
}
