use crate::interpreter::lexer;

/// A node of the structured expression tree.
///
/// The structurer produces a `Vec<Token>` for the whole expression; bracketed
/// sub-expressions and function argument lists become nested [`Token::Group`]s,
/// so nesting depth mirrors bracket nesting in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Raw literal or identifier text, trimmed. May hold commas, which the
    /// reducer later splits into function arguments.
    Atom(String),
    /// A recognized operator spelling, bound or not.
    Operator(&'static str),
    /// A bracketed sub-expression.
    Group(Vec<Token>),
}

impl Token {
    /// Creates an atom token.
    pub fn atom(text: impl Into<String>) -> Self {
        Self::Atom(text.into())
    }

    /// Returns `true` if the token is [`Token::Operator`].
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(..))
    }

    /// Returns `true` if the token is an atom that reads as a number.
    #[must_use]
    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, Self::Atom(text) if lexer::is_numeric_literal(text))
    }
}
