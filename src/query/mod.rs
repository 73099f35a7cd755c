mod tokenizing;
pub use tokenizing::*;
mod parsing;
pub use parsing::*;
mod matching;
pub use matching::*;
mod highlighting;
pub use highlighting::*;

use crate::*;
use std::fmt;

/// A node of a parsed query.
///
/// Queries are plain boolean formulas over text leaves. `Not`, `And` and
/// `Or` carry whole subtrees, so arbitrarily nested combinations come out
/// of the parser even though the syntax has no parentheses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    // word (may hold * ? ~ markers)
    Term(String),
    // "some words"
    Quoted(String),
    // NOT expr
    Not(Box<Expression>),
    // expr AND expr
    And(Box<Expression>, Box<Expression>),
    // expr OR expr
    Or(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Leaf values that appear outside any NOT.
    ///
    /// Callers use these to pre-filter or rank candidates on the words the
    /// query asks for. Negated words are what the query rejects, so they
    /// are not in here; [`Expression::highlight_terms`] collects those too.
    pub fn positive_terms(&self) -> Vec<&str> {
        match self {
            Expression::Term(value) | Expression::Quoted(value) => vec![value.as_str()],
            Expression::Not(_) => Vec::new(),
            Expression::And(left, right) | Expression::Or(left, right) => {
                let mut terms = left.positive_terms();
                terms.extend(right.positive_terms());
                terms
            }
        }
    }

    const fn precedence(&self) -> u8 {
        match self {
            Expression::Or(..) => 1,
            Expression::And(..) => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parenthesizes an operand bound by a tighter parent
        fn operand(f: &mut fmt::Formatter<'_>, expr: &Expression, parent: u8) -> fmt::Result {
            match expr.precedence() < parent {
                true => write!(f, "({expr})"),
                false => write!(f, "{expr}"),
            }
        }

        match self {
            Expression::Term(value) => f.write_str(value),
            Expression::Quoted(value) => write!(f, "\"{value}\""),
            Expression::Not(inner) => {
                f.write_str("NOT ")?;
                operand(f, inner, 3)
            }
            Expression::And(left, right) => {
                operand(f, left, 2)?;
                f.write_str(" AND ")?;
                operand(f, right, 2)
            }
            Expression::Or(left, right) => {
                operand(f, left, 1)?;
                f.write_str(" OR ")?;
                operand(f, right, 1)
            }
        }
    }
}

/// A parsed query, ready to run against records.
///
/// `Query::parse` accepts anything, including half-typed garbage, which is
/// what a search box emits on every keystroke. A query that asks for
/// nothing (blank, or operators only) matches every record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    raw: String,
    root: Option<Expression>,
}

impl Query {
    pub fn parse(query: &str) -> Query {
        let root = parse_search_query(query);
        trace!("Parsed query {query:?} into {root:?}");
        Query {
            raw: query.to_string(),
            root,
        }
    }

    /// The string the query was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn root(&self) -> Option<&Expression> {
        self.root.as_ref()
    }

    /// True when the query asks for nothing and matches everything.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Matches a record on its core fields.
    pub fn matches(&self, record: &impl Record) -> bool {
        self.matches_with(record, &MatchOptions::default())
    }

    pub fn matches_with(&self, record: &impl Record, options: &MatchOptions) -> bool {
        matches_query(self.root(), record, options)
    }

    /// Evaluates the query with a caller-supplied leaf predicate.
    ///
    /// `search_fn` receives each leaf value and whether it was quoted.
    pub fn evaluate(&self, mut search_fn: impl FnMut(&str, bool) -> bool) -> bool {
        evaluate_query(self.root(), &mut search_fn)
    }

    /// Keeps the records the query matches, in their original order.
    pub fn matching_records<'r, R: Record>(
        &self,
        records: impl IntoIterator<Item = &'r R>,
    ) -> Vec<&'r R> {
        self.matching_records_with(records, &MatchOptions::default())
    }

    pub fn matching_records_with<'r, R: Record>(
        &self,
        records: impl IntoIterator<Item = &'r R>,
        options: &MatchOptions,
    ) -> Vec<&'r R> {
        records
            .into_iter()
            .filter(|record| self.matches_with(*record, options))
            .collect()
    }

    /// Every leaf value the query mentions, for highlighting.
    pub fn highlight_terms(&self) -> Vec<String> {
        highlight_terms(self.root())
    }

    pub fn positive_terms(&self) -> Vec<&str> {
        match self.root() {
            Some(root) => root.positive_terms(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<serde_json::Value> {
        vec![
            json!({
                "name": "Wire transfer",
                "key": "txn-0042",
                "summary": "Transfer flagged by J. Smith",
                "type": "transaction",
                "amount": 12500,
            }),
            json!({
                "name": "Internal transfer",
                "key": "txn-0051",
                "summary": "Transfer reviewed by A. Smith",
                "type": "transaction",
                "amount": 400,
            }),
            json!({
                "name": "Account opening",
                "key": "evt-0007",
                "summary": "Account opened for R. Jones",
                "type": "event",
                "amount": null,
            }),
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let records = records();
        for query in ["", "   ", "AND OR"] {
            let query = Query::parse(query);
            assert!(query.is_empty());
            assert_eq!(query.matching_records(&records).len(), 3);
        }
    }

    #[test]
    fn end_to_end_filtering() {
        let records = records();

        let query = Query::parse("smith AND transfer NOT wire");
        let matching = query.matching_records(&records);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].get("key"), Some(&json!("txn-0051")));

        // Without the exclusion both transfers match
        let query = Query::parse("smith transfer");
        assert_eq!(query.matching_records(&records).len(), 2);

        let query = Query::parse("internal OR account");
        assert_eq!(query.matching_records(&records).len(), 2);

        let query = Query::parse("-transaction");
        let matching = query.matching_records(&records);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].get("key"), Some(&json!("evt-0007")));
    }

    #[test]
    fn exclusion_short_circuits() {
        let query = Query::parse("smith AND transfer NOT wire");
        let wire = json!({
            "name": "Smith Corp",
            "summary": "wire transfer completed",
            "type": "Transaction",
        });
        let ach = json!({
            "name": "Smith Corp",
            "summary": "ACH transfer completed",
            "type": "Transaction",
        });
        assert!(!query.matches(&wire));
        assert!(query.matches(&ach));
    }

    #[test]
    fn or_with_implicit_and() {
        // Only b and c present: the right branch of the OR carries the match
        let record = json!({
            "name": "b c",
            "key": "",
            "summary": "",
            "type": "",
        });
        assert!(Query::parse("a OR b c").matches(&record));
        assert!(!Query::parse("a b c").matches(&record));
    }

    #[test]
    fn custom_predicate() {
        let query = Query::parse("alice AND NOT bob");
        let words = ["alice", "carol"];
        assert!(query.evaluate(|value, _| words.contains(&value)));
        let words = ["alice", "bob"];
        assert!(!query.evaluate(|value, _| words.contains(&value)));
        // The quoted flag reaches the predicate
        let query = Query::parse("\"alice\"");
        assert!(query.evaluate(|_, quoted| quoted));
    }

    #[test]
    fn positive_terms_skip_negations() {
        let query = Query::parse("smith AND transfer NOT wire OR \"cash out\"");
        assert_eq!(query.positive_terms(), vec!["smith", "transfer", "cash out"]);
        assert_eq!(Query::parse("").positive_terms(), Vec::<&str>::new());
    }

    #[test]
    fn display_round_trips() {
        for query in [
            "smith AND transfer AND NOT wire",
            "a OR b AND c",
            "a b c OR d",
            "\"wire transfer\" OR cash",
        ] {
            let parsed = Query::parse(query);
            let reparsed = Query::parse(&parsed.to_string());
            assert_eq!(parsed.root(), reparsed.root(), "{query}");
        }
        assert_eq!(Query::parse("a -b").to_string(), "a AND NOT b");
        assert_eq!(Query::parse("").to_string(), "");
    }
}
