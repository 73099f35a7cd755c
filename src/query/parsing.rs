use crate::*;

/// Parses a raw query string into an expression tree.
///
/// Returns `None` when there is nothing to match against: empty input,
/// blank input, or operators with no operands. `None` means "no filter"
/// and every record matches it.
pub fn parse_search_query(query: &str) -> Option<Expression> {
    parse_expression(tokenize(query))
}

/// Builds an expression tree from a token list.
///
/// Three rewrite passes run over the list, one per precedence level: NOT
/// binds tightest, then AND (explicit, or implied between adjacent terms),
/// then OR. Misplaced operators never fail the parse: a dangling, doubled
/// or leading operator is dropped and the rest of the query still builds.
pub fn parse_expression(tokens: Vec<Token>) -> Option<Expression> {
    let parts = apply_not(tokens);
    let parts = apply_and(parts);
    apply_or(parts)
}

// Worklist element between passes: a finished subtree, or an operator
// token still waiting for its pass.
enum Part {
    Expr(Expression),
    Pending(Operator),
}

fn leaf(token: Token) -> Option<Expression> {
    match token {
        Token::Term(value) => Some(Expression::Term(value)),
        Token::Quoted(value) => Some(Expression::Quoted(value)),
        Token::Operator(_) => None,
    }
}

// NOT pass: each NOT wraps the single token following it. Only a term or a
// phrase can be negated; a NOT followed by an operator (or by nothing) has
// no operand and is dropped, so "NOT NOT a" degrades to "NOT a".
fn apply_not(tokens: Vec<Token>) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut tokens = tokens.into_iter().peekable();
    while let Some(token) = tokens.next() {
        match token {
            Token::Operator(Operator::Not) => {
                if matches!(tokens.peek(), Some(Token::Term(_) | Token::Quoted(_))) {
                    if let Some(operand) = tokens.next().and_then(leaf) {
                        parts.push(Part::Expr(Expression::Not(Box::new(operand))));
                    }
                }
            }
            Token::Operator(op) => parts.push(Part::Pending(op)),
            token => {
                if let Some(expr) = leaf(token) {
                    parts.push(Part::Expr(expr));
                }
            }
        }
    }
    parts
}

// AND pass: adjacent subtrees fuse left to right, whether the AND was
// written out or implied. Reaching an OR flushes the run, so adjacency
// never crosses it: "a OR b c" keeps `a` apart and fuses `b c`.
fn apply_and(parts: Vec<Part>) -> Vec<Part> {
    let mut out = Vec::new();
    let mut current: Option<Expression> = None;
    for part in parts {
        match part {
            Part::Expr(expr) => {
                current = Some(match current.take() {
                    Some(left) => Expression::And(Box::new(left), Box::new(expr)),
                    None => expr,
                });
            }
            // An explicit AND between two subtrees adds nothing adjacency
            // does not already say, and a dangling one has nothing to bind
            Part::Pending(Operator::And) => (),
            Part::Pending(op) => {
                if let Some(expr) = current.take() {
                    out.push(Part::Expr(expr));
                }
                out.push(Part::Pending(op));
            }
        }
    }
    if let Some(expr) = current.take() {
        out.push(Part::Expr(expr));
    }
    out
}

// OR pass: after the AND pass the list alternates subtrees and OR tokens,
// so every remaining gap is an OR. Fold left to right; ORs that lost an
// operand to recovery vanish with it.
fn apply_or(parts: Vec<Part>) -> Option<Expression> {
    let mut result: Option<Expression> = None;
    for part in parts {
        let Part::Expr(expr) = part else { continue };
        result = Some(match result.take() {
            Some(left) => Expression::Or(Box::new(left), Box::new(expr)),
            None => expr,
        });
    }
    result
}
