/// A lexical unit of a query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    // word
    Term(String),
    // "some words" or 'some words'
    Quoted(String),
    // AND, OR, NOT (or a leading -)
    Operator(Operator),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

/// Cuts a raw query string into terms, quoted phrases and operators.
///
/// Single pass over the characters, and it never fails: an unterminated
/// quote degrades to a plain term, so a query being typed live always
/// tokenizes. Both `"` and `'` open a phrase, and only the matching
/// character closes it. A `-` at the start of the query or right after a
/// space reads as NOT; anywhere else it is part of the word.
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut opening_quote = None;
    let mut previous = None;

    for (i, c) in query.chars().enumerate() {
        match opening_quote {
            Some(quote) if c == quote => {
                // Phrases keep their content verbatim, even when empty
                tokens.push(Token::Quoted(std::mem::take(&mut buffer)));
                opening_quote = None;
            }
            Some(_) => buffer.push(c),
            None if c == '"' || c == '\'' => {
                flush_term(&mut tokens, &mut buffer);
                opening_quote = Some(c);
            }
            None if c == '-' && (i == 0 || previous == Some(' ')) => {
                flush_term(&mut tokens, &mut buffer);
                tokens.push(Token::Operator(Operator::Not));
            }
            None if c == ' ' => flush_word(&mut tokens, &mut buffer),
            None => buffer.push(c),
        }
        previous = Some(c);
    }

    match opening_quote.is_some() {
        // Unterminated quote: recover the buffered text as a plain term
        true => flush_term(&mut tokens, &mut buffer),
        false => flush_word(&mut tokens, &mut buffer),
    }

    tokens
}

// Flushes the buffer as a term, with no operator detection.
fn flush_term(tokens: &mut Vec<Token>, buffer: &mut String) {
    let value = buffer.trim();
    if !value.is_empty() {
        tokens.push(Token::Term(value.to_string()));
    }
    buffer.clear();
}

// Flushes the buffer, turning the words AND, OR and NOT (any case) into
// operators. Buffers that trim to nothing produce no token.
fn flush_word(tokens: &mut Vec<Token>, buffer: &mut String) {
    let value = buffer.trim();
    match value.to_uppercase().as_str() {
        "" => (),
        "AND" => tokens.push(Token::Operator(Operator::And)),
        "OR" => tokens.push(Token::Operator(Operator::Or)),
        "NOT" => tokens.push(Token::Operator(Operator::Not)),
        _ => tokens.push(Token::Term(value.to_string())),
    }
    buffer.clear();
}
