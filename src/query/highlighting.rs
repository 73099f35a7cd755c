use crate::*;
use regex::RegexBuilder;
use std::ops::Range;

/// Collects every leaf value a possibly-absent tree mentions.
pub fn highlight_terms(ast: Option<&Expression>) -> Vec<String> {
    match ast {
        Some(expr) => expr.highlight_terms(),
        None => Vec::new(),
    }
}

impl Expression {
    /// Collects every leaf value the query mentions, for highlighting.
    ///
    /// Values come out lower-cased and trimmed, without empties, and each
    /// one only once, in first-seen order. Negated leaves are collected
    /// too: the UI highlights what the query talks about, not what made a
    /// record match.
    pub fn highlight_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms(&self, terms: &mut Vec<String>) {
        match self {
            Expression::Term(value) | Expression::Quoted(value) => {
                let term = value.trim().to_lowercase();
                if !term.is_empty() && !terms.contains(&term) {
                    terms.push(term);
                }
            }
            Expression::Not(inner) => inner.collect_terms(terms),
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.collect_terms(terms);
                right.collect_terms(terms);
            }
        }
    }
}

/// Finds where the given terms occur in a display string.
///
/// The scan is case-insensitive and the returned byte ranges index `text`
/// as given. Occurrences of one term never overlap themselves (the scan
/// resumes after each hit). Ranges from all terms are sorted by start and
/// overlapping ones are merged; ranges that merely touch stay separate, so
/// back-to-back repeats come out as distinct ranges.
pub fn highlight_ranges(text: &str, terms: &[String]) -> Vec<Range<usize>> {
    if text.is_empty() || terms.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    for term in terms {
        if term.is_empty() {
            continue;
        }
        let regex = RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
            .expect("escaped pattern is always valid");
        for found in regex.find_iter(text) {
            ranges.push(found.start()..found.end());
        }
    }
    ranges.sort_unstable_by_key(|range| (range.start, range.end));

    let mut merged: Vec<Range<usize>> = Vec::new();
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start < last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
