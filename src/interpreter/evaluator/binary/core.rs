use crate::{
    error::{CalcResult, ErrorKind},
    interpreter::value::core::{Numeric, Value},
};

/// A pair of operands brought to a common numeric representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operands {
    /// Both sides are integers (booleans count as integers).
    Integers(i64, i64),
    /// At least one side is real; the other has been promoted.
    Reals(f64, f64),
}

/// Promotes two values to a common numeric representation.
///
/// - Integer with integer stays integer.
/// - Any real on either side promotes the other side to real.
/// - Tuples are rejected with a `TypeError` naming the operator.
///
/// # Example
/// ```
/// use infixcalc::interpreter::{
///     evaluator::binary::core::{Operands, promote},
///     value::core::Value,
/// };
///
/// let pair = promote("+", &Value::Integer(1), &Value::Real(0.5)).unwrap();
/// assert_eq!(pair, Operands::Reals(1.0, 0.5));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn promote(symbol: &str, left: &Value, right: &Value) -> CalcResult<Operands> {
    let (Ok(l), Ok(r)) = (left.numeric(), right.numeric()) else {
        return Err(unsupported_operands(symbol, left, right));
    };

    Ok(match (l, r) {
        (Numeric::Integer(a), Numeric::Integer(b)) => Operands::Integers(a, b),
        (Numeric::Integer(a), Numeric::Real(b)) => Operands::Reals(a as f64, b),
        (Numeric::Real(a), Numeric::Integer(b)) => Operands::Reals(a, b as f64),
        (Numeric::Real(a), Numeric::Real(b)) => Operands::Reals(a, b),
    })
}

/// Builds the error returned when an operator cannot handle its operand types.
pub fn unsupported_operands(symbol: &str, left: &Value, right: &Value) -> crate::error::CalcError {
    ErrorKind::type_error(format!("unsupported operand types for {symbol}: {} and {}",
                                  left.type_name(),
                                  right.type_name())).into()
}

/// Rejects a real result that overflowed to infinity from finite operands.
pub fn finite_result(symbol: &str, a: f64, b: f64, result: f64) -> CalcResult<Value> {
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(ErrorKind::overflow(format!("result of {symbol} is too large")).into());
    }
    Ok(Value::Real(result))
}
