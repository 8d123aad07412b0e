//! Literal `LIKE` patterns.
//!
//! Tag names are never interpolated into a pattern as-is: `%` and `_` would
//! widen the match and `\` would change what follows it. Everything here uses
//! `\` as the escape character, matching the `ESCAPE '\\'` clause the SQL
//! store appends.

pub const ESCAPE_CHAR: char = '\\';

/// Escape `name` so that it only ever matches itself.
pub fn escape_like(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if matches!(c, '%' | '_' | ESCAPE_CHAR) {
            out.push(ESCAPE_CHAR);
        }
        out.push(c);
    }
    out
}

/// Pattern for an exact, case-insensitive match.
pub fn exact_pattern(name: &str) -> String {
    escape_like(name)
}

/// Pattern for a case-insensitive substring match.
pub fn contains_pattern(name: &str) -> String {
    format!("%{}%", escape_like(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    AnySequence,
    AnyChar,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => Token::AnySequence,
            '_' => Token::AnyChar,
            ESCAPE_CHAR => Token::Literal(chars.next().unwrap_or(ESCAPE_CHAR)),
            other => Token::Literal(other),
        };
        tokens.push(token);
    }
    tokens
}

fn same_ignoring_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Evaluate a `LIKE` pattern against `candidate`, case-insensitively.
///
/// Used by stores that have no SQL engine behind them.
pub fn like_matches(pattern: &str, candidate: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = candidate.chars().collect();

    // matched[j]: tokens consumed so far match text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;

    for token in tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            Token::AnySequence => {
                let mut reachable = false;
                for j in 0..=text.len() {
                    reachable |= matched[j];
                    next[j] = reachable;
                }
            }
            Token::AnyChar => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1];
                }
            }
            Token::Literal(c) => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1] && same_ignoring_case(c, text[j - 1]);
                }
            }
        }
        matched = next;
    }

    matched[text.len()]
}
