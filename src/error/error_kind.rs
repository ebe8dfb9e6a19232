use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all failures that can occur while structuring or evaluating an
/// expression.
pub enum ErrorKind {
    /// The expression produced no tokens at all.
    #[error("Empty expression string was provided.")]
    EmptyExpression,
    /// The expression text cannot be turned into a valid token sequence:
    /// unbalanced brackets, a dangling operator, stray characters in a
    /// numeric literal, and similar.
    #[error("Malformed expression: {details}")]
    MalformedExpression {
        /// What exactly is wrong with the expression.
        details: String,
    },
    /// An identifier was not found in any configured namespace.
    #[error("Unknown symbol \"{name}\".")]
    UnknownSymbol {
        /// The identifier as written in the expression.
        name: String,
    },
    /// A function rejected the arguments it was called with.
    #[error("Function '{name}' rejects its arguments: {details}.")]
    ArityMismatch {
        /// The function name.
        name:    String,
        /// Why the arguments were rejected.
        details: String,
    },
    /// A binary operator has no operand on one of its sides.
    #[error("Operand is missing in the expression.")]
    MissingOperand,
    /// The operator character is recognized but not bound to an operation.
    #[error("Operator '{symbol}' is not supported.")]
    UnsupportedOperator {
        /// The operator as written.
        symbol: String,
    },
    /// A namespace name could not be found in the registry.
    #[error("Unknown namespace \"{name}\".")]
    UnknownNamespace {
        /// The requested namespace name.
        name: String,
    },
    /// Brackets are nested deeper than the configured limit.
    #[error("Brackets are nested deeper than {limit} levels.")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
    /// Attempted division or modulo by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// An integer or float result does not fit its representation.
    #[error("Numeric overflow: {details}.")]
    Overflow {
        /// Which computation overflowed.
        details: String,
    },
    /// A math function was called outside of its domain.
    #[error("Math domain error in '{function}'.")]
    MathDomain {
        /// The function (or operator) that rejected its input.
        function: String,
    },
    /// An operation received a value of the wrong type.
    #[error("Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
    },
}

impl ErrorKind {
    /// Shorthand for [`ErrorKind::MalformedExpression`].
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedExpression { details: details.into() }
    }

    /// Shorthand for [`ErrorKind::TypeError`].
    pub fn type_error(details: impl Into<String>) -> Self {
        Self::TypeError { details: details.into() }
    }

    /// Shorthand for [`ErrorKind::Overflow`].
    pub fn overflow(details: impl Into<String>) -> Self {
        Self::Overflow { details: details.into() }
    }

    /// Shorthand for [`ErrorKind::MathDomain`].
    pub fn domain(function: impl Into<String>) -> Self {
        Self::MathDomain { function: function.into() }
    }

    /// Returns the variant name, stable across message wording changes.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EmptyExpression => "EmptyExpression",
            Self::MalformedExpression { .. } => "MalformedExpression",
            Self::UnknownSymbol { .. } => "UnknownSymbol",
            Self::ArityMismatch { .. } => "ArityMismatch",
            Self::MissingOperand => "MissingOperand",
            Self::UnsupportedOperator { .. } => "UnsupportedOperator",
            Self::UnknownNamespace { .. } => "UnknownNamespace",
            Self::NestingTooDeep { .. } => "NestingTooDeep",
            Self::DivisionByZero => "DivisionByZero",
            Self::Overflow { .. } => "Overflow",
            Self::MathDomain { .. } => "MathDomain",
            Self::TypeError { .. } => "TypeError",
        }
    }
}
