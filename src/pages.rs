//! Per-page text as produced by an external PDF text extractor.

use serde::{Deserialize, Serialize};

const PAGE_BREAK: char = '\x0c';

/// One text-draw operation and where it landed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl TextRun {
    pub fn new(text: &str, x: f64, y: f64) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<String>,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// Receives every string a page draws, in drawing order.
pub trait TextRunVisitor {
    fn show_text(&mut self, text: &str);

    /// Called once a visual line has been fully drawn.
    fn end_line(&mut self) {}
}

impl<F> TextRunVisitor for F
where
    F: FnMut(&str),
{
    fn show_text(&mut self, text: &str) {
        self(text)
    }
}

impl Page {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            runs: Vec::new(),
        }
    }

    pub fn with_runs(mut self, runs: Vec<TextRun>) -> Self {
        self.runs = runs;
        self
    }

    /// Splits `pdftotext`-style output into pages on form feeds.
    pub fn split_text(text: &str) -> Vec<Page> {
        let mut pages: Vec<Page> = text.split(PAGE_BREAK).map(Page::from_text).collect();

        // pdftotext terminates every page with a form feed
        if pages.len() > 1 && pages.last().is_some_and(|page| page.lines.is_empty()) {
            pages.pop();
        }

        pages
    }

    /// Feeds the visitor each text run, or each line when no runs were captured.
    ///
    /// Runs sharing a baseline `y` form one visual line; `end_line` fires
    /// whenever the baseline changes and after the last run.
    pub fn walk<V: TextRunVisitor + ?Sized>(&self, visitor: &mut V) {
        if self.runs.is_empty() {
            for line in &self.lines {
                visitor.show_text(line);
                visitor.end_line();
            }
            return;
        }

        let mut baseline = None;
        for run in &self.runs {
            if baseline.is_some_and(|y| y != run.y) {
                visitor.end_line();
            }
            baseline = Some(run.y);
            visitor.show_text(&run.text);
        }
        visitor.end_line();
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
            || self.runs.iter().any(|run| run.text.contains(needle))
    }
}
