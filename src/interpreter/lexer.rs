use logos::Logos;

/// A lexical token inside a single atom.
///
/// The structurer leaves literals and identifiers as raw text; the reducer
/// runs this lexer over each piece of text to decide what it is. A valid atom
/// lexes to exactly one token.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AtomToken {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.`, or `1e10`.
    #[regex(r"[+-]?[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[+-]?\.[0-9]+([eE][+-]?[0-9]+)?", parse_real)]
    #[regex(r"[+-]?[0-9]+[eE][+-]?[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42` or the signed unit `-1` produced
    /// by unary-sign escaping.
    #[regex(r"[+-]?[0-9]+", parse_integer)]
    Integer(i64),
    /// Identifier tokens; constant or function names such as `pi` or `sin`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

fn parse_real(lex: &logos::Lexer<AtomToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_integer(lex: &logos::Lexer<AtomToken>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Classifies a piece of text as a single atom.
///
/// Returns `None` if the text is empty, contains characters no token
/// accepts, or holds more than one token (such as `1.2.3` or `2 3`).
///
/// # Example
/// ```
/// use infixcalc::interpreter::lexer::{AtomToken, classify};
///
/// assert_eq!(classify("42"), Some(AtomToken::Integer(42)));
/// assert_eq!(classify("-1"), Some(AtomToken::Integer(-1)));
/// assert_eq!(classify(" .5 "), Some(AtomToken::Real(0.5)));
/// assert_eq!(classify("pi"), Some(AtomToken::Identifier("pi".to_string())));
/// assert_eq!(classify("1.2.3"), None);
/// ```
#[must_use]
pub fn classify(text: &str) -> Option<AtomToken> {
    let mut lexer = AtomToken::lexer(text);
    let token = lexer.next()?.ok()?;
    if lexer.next().is_some() {
        return None;
    }
    Some(token)
}

/// Returns `true` if the text reads as a number, which is when a bracket
/// right after it means implicit multiplication.
#[must_use]
pub fn is_numeric_literal(text: &str) -> bool {
    matches!(classify(text), Some(AtomToken::Integer(_) | AtomToken::Real(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_units_lex_as_integers() {
        assert_eq!(classify("+1"), Some(AtomToken::Integer(1)));
        assert_eq!(classify("-1"), Some(AtomToken::Integer(-1)));
    }

    #[test]
    fn reals_in_every_spelling() {
        assert_eq!(classify("1.5"), Some(AtomToken::Real(1.5)));
        assert_eq!(classify("2."), Some(AtomToken::Real(2.0)));
        assert_eq!(classify("1e3"), Some(AtomToken::Real(1000.0)));
    }

    #[test]
    fn several_tokens_are_not_an_atom() {
        assert_eq!(classify("2 3"), None);
        assert_eq!(classify("5sin"), None);
        assert_eq!(classify("s in"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("3$"), None);
    }

    #[test]
    fn oversized_integers_are_rejected() {
        assert_eq!(classify("99999999999999999999"), None);
    }

    #[test]
    fn numeric_literals_trigger_implicit_multiplication() {
        assert!(is_numeric_literal("3"));
        assert!(is_numeric_literal("2.5"));
        assert!(!is_numeric_literal("sin"));
        assert!(!is_numeric_literal("1,"));
    }
}
