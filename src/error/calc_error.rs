use thiserror::Error;

use crate::error::ErrorKind;

/// Result type used throughout the crate.
pub type CalcResult<T> = Result<T, CalcError>;

/// An evaluation failure, optionally annotated with the expression it came
/// from.
///
/// The rendered message always starts with `ERROR: ` and, once an expression
/// is attached, ends with `: "<expression>"`.
///
/// # Example
/// ```
/// use infixcalc::error::{CalcError, ErrorKind};
///
/// let err = CalcError::from(ErrorKind::MissingOperand).with_expression("1+");
/// assert_eq!(err.to_string(),
///            "ERROR: Operand is missing in the expression.: \"1+\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ERROR: {}{}", .kind, expression_suffix(.expression.as_deref()))]
pub struct CalcError {
    /// What went wrong.
    pub kind:       ErrorKind,
    /// The top-level expression, once known.
    pub expression: Option<String>,
}

impl CalcError {
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind,
               expression: None }
    }

    /// Attaches the top-level expression unless one is already attached.
    ///
    /// Errors bubble up through every recursion level unchanged; only the
    /// outermost caller knows the full text, and the first attachment wins.
    #[must_use]
    pub fn with_expression(mut self, expression: &str) -> Self {
        if self.expression.is_none() {
            self.expression = Some(expression.to_string());
        }
        self
    }
}

impl From<ErrorKind> for CalcError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

fn expression_suffix(expression: Option<&str>) -> String {
    expression.map_or_else(String::new, |text| format!(": \"{text}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_expression() {
        let err = CalcError::from(ErrorKind::EmptyExpression);
        assert_eq!(err.to_string(), "ERROR: Empty expression string was provided.");
    }

    #[test]
    fn first_attached_expression_wins() {
        let err = CalcError::from(ErrorKind::MissingOperand).with_expression("(1+)")
                                                            .with_expression("2*(1+)");
        assert_eq!(err.expression.as_deref(), Some("(1+)"));
        assert!(err.to_string().ends_with(": \"(1+)\""));
    }
}
