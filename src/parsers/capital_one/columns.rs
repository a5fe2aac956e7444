use std::borrow::Cow;

use tracing::trace;

use super::patterns::Patterns;
use crate::config::ColumnRange;

/// Cuts `line` into one substring per column and repairs each against the
/// same column of `next_line`.
pub(super) fn split_and_repair<'a>(
    patterns: &Patterns,
    columns: &[ColumnRange],
    line: &'a str,
    next_line: Option<&str>,
) -> Vec<Cow<'a, str>> {
    columns
        .iter()
        .map(|range| {
            let current = range.slice(line);
            let next = next_line.map(|next| range.slice(next)).unwrap_or_default();
            repair(patterns, current, next)
        })
        .collect()
}

/// Appends a wrapped amount from the next line's column when the current
/// column has none and the next one carries nothing else.
pub(super) fn repair<'a>(patterns: &Patterns, current: &'a str, next: &str) -> Cow<'a, str> {
    if !patterns.amount.is_match(current) && patterns.amount_only.is_match(next) {
        trace!(current, next, "joining wrapped amount");
        Cow::Owned(format!("{} {}", current, next.trim()))
    } else {
        Cow::Borrowed(current)
    }
}
