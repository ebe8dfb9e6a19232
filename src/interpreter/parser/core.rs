use tracing::debug;

use crate::{
    ast::Token,
    error::{CalcResult, ErrorKind},
    interpreter::{
        evaluator::core::EvalOptions,
        parser::utils::{continues_exponent, flush, is_unary_position},
        rules,
    },
};

/// Recursive-descent structurer over the characters of one expression.
///
/// Every bracket level is one call of [`Structurer::parse_level`]; all levels
/// share a single cursor, so when a nested level returns, the outer level
/// resumes right after the matching closing bracket.
pub struct Structurer<'a> {
    pub(in crate::interpreter::parser) source:    &'a str,
    pub(in crate::interpreter::parser) chars:     Vec<char>,
    pub(in crate::interpreter::parser) pos:       usize,
    pub(in crate::interpreter::parser) max_depth: usize,
}

/// Structures an expression with the default options.
///
/// # Errors
/// - `MalformedExpression` for unbalanced or mismatched brackets.
/// - `NestingTooDeep` when brackets nest beyond the default limit.
///
/// # Example
/// ```
/// use infixcalc::{ast::Token, interpreter::parser::core::structure};
///
/// let tokens = structure("3(2+1)").unwrap();
/// assert_eq!(tokens,
///            vec![Token::atom("3"),
///                 Token::Operator("*"),
///                 Token::Group(vec![Token::atom("2"), Token::Operator("+"), Token::atom("1")])]);
///
/// let err = structure("((1)").unwrap_err();
/// assert!(err.to_string().ends_with(": \"((1)\""));
/// ```
pub fn structure(expression: &str) -> CalcResult<Vec<Token>> {
    structure_with(expression, &EvalOptions::default())
}

/// Structures an expression with explicit options.
///
/// # Errors
/// See [`structure`].
pub fn structure_with(expression: &str, options: &EvalOptions) -> CalcResult<Vec<Token>> {
    let tokens = Structurer::new(expression, options).run()?;
    debug!(expression, tokens = tokens.len(), "structured expression");
    Ok(tokens)
}

impl<'a> Structurer<'a> {
    #[must_use]
    pub fn new(source: &'a str, options: &EvalOptions) -> Self {
        Self { source,
               chars: source.chars().collect(),
               pos: 0,
               max_depth: options.max_depth }
    }

    /// Consumes the whole expression and returns the top-level sequence.
    ///
    /// Any error carries the full expression text.
    pub fn run(mut self) -> CalcResult<Vec<Token>> {
        self.parse_level(0, None)
            .map_err(|err| err.with_expression(self.source))
    }

    pub(in crate::interpreter::parser) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Parses one bracket level.
    ///
    /// `closing` is the bracket that ends this level, or `None` at the top
    /// level, where running out of input is the normal end.
    fn parse_level(&mut self, depth: usize, closing: Option<char>) -> CalcResult<Vec<Token>> {
        if depth > self.max_depth {
            return Err(ErrorKind::NestingTooDeep { limit: self.max_depth }.into());
        }

        let mut tokens = Vec::new();
        let mut buffer = String::new();

        while let Some(c) = self.advance() {
            if rules::is_open_bracket(c) {
                // `3(2+1)` means `3 * (2+1)`.
                if flush(&mut tokens, &mut buffer)
                   && tokens.last().is_some_and(Token::is_numeric_literal)
                {
                    tokens.push(Token::Operator("*"));
                }
                let group = self.parse_level(depth + 1, rules::closing_bracket(c))?;
                tokens.push(Token::Group(group));
            } else if rules::is_close_bracket(c) {
                flush(&mut tokens, &mut buffer);
                return match closing {
                    Some(expected) if expected == c => Ok(tokens),
                    Some(expected) => {
                        Err(ErrorKind::malformed(format!("expected '{expected}' but found '{c}'")).into())
                    },
                    None => Err(ErrorKind::malformed(format!("unmatched closing bracket '{c}'")).into()),
                };
            } else if matches!(c, '+' | '-') && continues_exponent(&buffer) {
                buffer.push(c);
            } else if rules::is_operator_char(c) {
                flush(&mut tokens, &mut buffer);
                let symbol = self.read_operator(c)?;
                if rules::is_sign(symbol) && is_unary_position(&tokens) {
                    self.escape_sign(symbol, &mut tokens);
                } else {
                    tokens.push(Token::Operator(symbol));
                }
            } else {
                buffer.push(c);
            }
        }

        flush(&mut tokens, &mut buffer);
        match closing {
            Some(expected) => Err(ErrorKind::malformed(format!("missing closing bracket '{expected}'")).into()),
            None => Ok(tokens),
        }
    }

    /// Reads an operator whose first character has already been consumed,
    /// preferring a two-character compound operator when one matches.
    fn read_operator(&mut self, first: char) -> CalcResult<&'static str> {
        if let Some(second) = self.peek() {
            let pair: String = [first, second].iter().collect();
            if rules::COMPOUND_OPERATORS.contains(&pair.as_str())
               && let Some(symbol) = rules::canonical_symbol(&pair)
            {
                self.pos += 1;
                return Ok(symbol);
            }
        }

        rules::canonical_symbol(first.encode_utf8(&mut [0; 4]))
            .ok_or_else(|| ErrorKind::malformed(format!("unexpected character '{first}'")).into())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn atom(text: &str) -> Token {
        Token::atom(text)
    }

    fn op(symbol: &'static str) -> Token {
        Token::Operator(symbol)
    }

    fn group(tokens: Vec<Token>) -> Token {
        Token::Group(tokens)
    }

    fn signed(sign: &str, operand: &str) -> Token {
        group(vec![atom(&format!("{sign}1")), op("*"), atom(operand)])
    }

    #[test]
    fn operators_split_literals() {
        assert_eq!(structure("1+1").unwrap(), vec![atom("1"), op("+"), atom("1")]);
        assert_eq!(structure(" 2 ** 3 ").unwrap(), vec![atom("2"), op("**"), atom("3")]);
        assert_eq!(structure("1<=2").unwrap(), vec![atom("1"), op("<="), atom("2")]);
        assert_eq!(structure("7//2").unwrap(), vec![atom("7"), op("//"), atom("2")]);
    }

    #[test]
    fn brackets_become_groups() {
        assert_eq!(structure("1.0+(1.0*1.0)").unwrap(),
                   vec![atom("1.0"), op("+"), group(vec![atom("1.0"), op("*"), atom("1.0")])]);
        assert_eq!(structure("1.0+1.0-[1.0//1.0]").unwrap(),
                   vec![atom("1.0"),
                        op("+"),
                        atom("1.0"),
                        op("-"),
                        group(vec![atom("1.0"), op("//"), atom("1.0")])]);
    }

    #[test]
    fn sign_sequences_become_signed_units() {
        assert_eq!(structure("+1").unwrap(), vec![signed("+", "1")]);
        assert_eq!(structure("-+1").unwrap(), vec![signed("-", "1"), op("*"), signed("+", "1")]);
        assert_eq!(structure("+-1").unwrap(), vec![signed("+", "1"), op("*"), signed("-", "1")]);
        assert_eq!(structure("-pi").unwrap(), vec![signed("-", "pi")]);
        assert_eq!(structure("2**-1").unwrap(), vec![atom("2"), op("**"), signed("-", "1")]);
    }

    #[test]
    fn exponent_signs_stay_in_the_literal() {
        assert_eq!(structure("1e-3+2").unwrap(), vec![atom("1e-3"), op("+"), atom("2")]);
        assert_eq!(structure("-2.5E+2").unwrap(), vec![signed("-", "2.5E+2")]);
        assert_eq!(structure("x-1").unwrap(), vec![atom("x"), op("-"), atom("1")]);
        assert_eq!(structure("max(1, 2e-1)").unwrap(),
                   vec![atom("max"), group(vec![atom("1, 2e-1")])]);
    }

    #[test]
    fn sign_before_function_or_group_escapes_with_unit() {
        assert_eq!(structure("1+-sin(30)").unwrap(),
                   vec![atom("1"),
                        op("+"),
                        signed("-", "1"),
                        op("*"),
                        atom("sin"),
                        group(vec![atom("30")])]);
        assert_eq!(structure("-(2+3)").unwrap(),
                   vec![signed("-", "1"), op("*"), group(vec![atom("2"), op("+"), atom("3")])]);
    }

    #[test]
    fn trailing_sign_stays_an_operator() {
        assert_eq!(structure("1+-").unwrap(), vec![atom("1"), op("+"), op("-")]);
        assert_eq!(structure("-").unwrap(), vec![op("-")]);
    }

    #[test]
    fn function_arguments_keep_their_commas() {
        assert_eq!(structure("sin(30)").unwrap(), vec![atom("sin"), group(vec![atom("30")])]);
        assert_eq!(structure("pow(2, 3)").unwrap(), vec![atom("pow"), group(vec![atom("2, 3")])]);
        assert_eq!(structure("log(sin(30))").unwrap(),
                   vec![atom("log"), group(vec![atom("sin"), group(vec![atom("30")])])]);
    }

    #[test]
    fn sign_after_comma_is_unary() {
        assert_eq!(structure("pow(2,-3)").unwrap(),
                   vec![atom("pow"), group(vec![atom("2,"), signed("-", "3")])]);
        assert_eq!(structure("f(-2,3)").unwrap(),
                   vec![atom("f"), group(vec![signed("-", "2"), atom(",3")])]);
    }

    #[test]
    fn implicit_multiplication_follows_numbers_only() {
        assert_eq!(structure("3(2+1)").unwrap(),
                   vec![atom("3"), op("*"), group(vec![atom("2"), op("+"), atom("1")])]);
        assert_eq!(structure("5+1(1+1)").unwrap(),
                   vec![atom("5"),
                        op("+"),
                        atom("1"),
                        op("*"),
                        group(vec![atom("1"), op("+"), atom("1")])]);
        assert_eq!(structure("5sin(2)").unwrap(), vec![atom("5sin"), group(vec![atom("2")])]);
        assert_eq!(structure("(1)(2)").unwrap(), vec![group(vec![atom("1")]), group(vec![atom("2")])]);
    }

    #[test]
    fn unbalanced_brackets_quote_the_expression() {
        let err = structure("((((((1)+2)+3)+4)+5)").unwrap_err();
        assert_eq!(err.kind.name(), "MalformedExpression");
        assert!(err.to_string().ends_with(": \"((((((1)+2)+3)+4)+5)\""));

        assert_eq!(structure("1)").unwrap_err().kind.name(), "MalformedExpression");
        assert_eq!(structure("(1]").unwrap_err().kind.name(), "MalformedExpression");
    }

    #[test]
    fn deep_nesting_is_a_checked_error() {
        let options = EvalOptions { max_depth: 8 };
        let shallow = format!("{}1{}", "(".repeat(8), ")".repeat(8));
        assert!(structure_with(&shallow, &options).is_ok());

        let deep = format!("{}1{}", "(".repeat(9), ")".repeat(9));
        let err = structure_with(&deep, &options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 8 });
    }

    #[test]
    fn structuring_is_repeatable() {
        let text = "2*-sin(pi/2, 3) + 4(5)";
        assert_eq!(structure(text).unwrap(), structure(text).unwrap());
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(structure("").unwrap().is_empty());
        assert!(structure("   ").unwrap().is_empty());
    }
}
