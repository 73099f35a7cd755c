use crate::*;
use regex::RegexBuilder;

impl Expression {
    /// Evaluates the tree against a caller-supplied leaf predicate.
    ///
    /// The predicate receives each leaf value and whether it came from a
    /// quoted phrase. And/Or short-circuit, Not inverts its operand.
    pub fn evaluate<F>(&self, search_fn: &mut F) -> bool
    where
        F: FnMut(&str, bool) -> bool,
    {
        match self {
            Expression::Term(value) => search_fn(value, false),
            Expression::Quoted(value) => search_fn(value, true),
            Expression::Not(inner) => !inner.evaluate(search_fn),
            Expression::And(left, right) => left.evaluate(search_fn) && right.evaluate(search_fn),
            Expression::Or(left, right) => left.evaluate(search_fn) || right.evaluate(search_fn),
        }
    }

    /// Matches a record with the built-in text predicate.
    ///
    /// The record's searchable text is assembled once and every leaf runs
    /// against it.
    pub fn matches(&self, record: &impl Record, options: &MatchOptions) -> bool {
        let text = searchable_text(record, options);
        self.evaluate(&mut |value, exact| term_matches(value, &text, exact))
    }
}

/// Evaluates a possibly-absent tree: no query matches everything.
pub fn evaluate_query<F>(ast: Option<&Expression>, search_fn: &mut F) -> bool
where
    F: FnMut(&str, bool) -> bool,
{
    match ast {
        Some(expr) => expr.evaluate(search_fn),
        None => true,
    }
}

/// Matches a record against a possibly-absent tree.
pub fn matches_query(ast: Option<&Expression>, record: &impl Record, options: &MatchOptions) -> bool {
    match ast {
        Some(expr) => expr.matches(record, options),
        None => true,
    }
}

/// The built-in leaf predicate, over lower-cased searchable text.
///
/// A `*` or `?` in the value makes it a wildcard pattern and a `~` switches
/// to in-order character lookup. Anything else is substring containment.
/// Quoted phrases take the same containment path as plain terms, so the
/// `exact` flag changes nothing here; it only reaches custom predicates.
pub fn term_matches(value: &str, text: &str, _exact: bool) -> bool {
    let value = value.to_lowercase();
    if value.contains('*') || value.contains('?') {
        wildcard_matches(&value, text)
    } else if value.contains('~') {
        fuzzy_matches(&value, text)
    } else {
        text.contains(value.as_str())
    }
}

// `*` spans any run of characters, `?` exactly one. The rest is literal:
// escape everything, then turn the escaped markers back into their classes.
fn wildcard_matches(value: &str, text: &str) -> bool {
    let pattern = regex::escape(value).replace("\\*", ".*").replace("\\?", ".");
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("escaped pattern is always valid");
    regex.is_match(text)
}

// The `~` markers are stripped and the remaining characters must appear in
// the text in order, not necessarily adjacent.
fn fuzzy_matches(value: &str, text: &str) -> bool {
    let mut text_chars = text.chars();
    value
        .chars()
        .filter(|c| *c != '~')
        .all(|c| text_chars.by_ref().any(|t| t == c))
}
