use crate::{ast::Token, interpreter::lexer};

/// Moves the pending literal buffer into the token list.
///
/// The text is trimmed; blank text produces no token. Returns `true` if a
/// token was pushed.
pub(in crate::interpreter::parser) fn flush(tokens: &mut Vec<Token>, buffer: &mut String) -> bool {
    let text = buffer.trim();
    let pushed = !text.is_empty();
    if pushed {
        tokens.push(Token::atom(text));
    }
    buffer.clear();
    pushed
}

/// Decides whether a sign read right now is unary.
///
/// A sign is unary at the start of a level, right after another operator, or
/// right after an argument comma. After a group it is always binary:
/// `(1)-2`.
pub(in crate::interpreter::parser) fn is_unary_position(tokens: &[Token]) -> bool {
    match tokens.last() {
        None | Some(Token::Operator(_)) => true,
        Some(Token::Atom(text)) => text.ends_with(','),
        Some(Token::Group(_)) => false,
    }
}

/// Returns `true` if the pending text is a number cut short right after its
/// exponent marker, so that a following sign belongs to the literal:
/// `1e-3`. Only the text after the last argument comma counts: `1, 2e-1`.
pub(in crate::interpreter::parser) fn continues_exponent(pending: &str) -> bool {
    pending.rsplit(',')
           .next()
           .and_then(|last| last.trim().strip_suffix(['e', 'E']))
           .is_some_and(lexer::is_numeric_literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_continues_after_an_argument_comma() {
        assert!(continues_exponent("1e"));
        assert!(continues_exponent("1, 2e"));
        assert!(continues_exponent(", 2.5E "));
        assert!(!continues_exponent("1e, 2"));
        assert!(!continues_exponent("pie"));
        assert!(!continues_exponent("1, e"));
    }
}
